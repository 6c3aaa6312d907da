// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Lookup over raw struct tags of the form `key:"value" other:"value"`.
//!
//! Entries are separated by spaces. A key is a run of printable bytes that
//! are not `:` or `"`, followed immediately by a colon and a double-quoted
//! value. Parsing stops at the first malformed entry; entries before it are
//! still visible.

use std::collections::{BTreeMap, BTreeSet};

/// A borrowed view over a raw struct tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructTag<'a> {
    raw: &'a str,
}

impl<'a> StructTag<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    /// Returns the unquoted value for `key`, or `None` if the key is absent.
    /// The first entry with a matching key wins. A value with an invalid
    /// escape sequence is treated as absent.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.entries()
            .find(|(name, _)| *name == key)
            .and_then(|(_, quoted)| unquote(quoted))
    }

    /// Like [`StructTag::lookup`], but returns an empty string when absent.
    pub fn get(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_default()
    }

    /// All entries visible to [`StructTag::lookup`]. Only the first entry of
    /// a repeated key counts, so a key whose first value fails to unquote is
    /// left out even if a later duplicate is valid.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut seen = BTreeSet::new();
        let mut map = BTreeMap::new();
        for (name, quoted) in self.entries() {
            if !seen.insert(name) {
                continue;
            }
            if let Some(value) = unquote(quoted) {
                map.insert(name.to_string(), value);
            }
        }
        map
    }

    /// Iterates `(key, quoted value)` pairs in order.
    fn entries(&self) -> Entries<'a> {
        Entries { rest: self.raw }
    }
}

struct Entries<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.rest.trim_start_matches(' ');
        let bytes = tag.as_bytes();

        let key_len = bytes
            .iter()
            .take_while(|&&b| b > b' ' && b != b':' && b != b'"' && b != 0x7f)
            .count();
        if key_len == 0
            || key_len + 1 >= bytes.len()
            || bytes[key_len] != b':'
            || bytes[key_len + 1] != b'"'
        {
            self.rest = "";
            return None;
        }
        let key = &tag[..key_len];

        // Scan the quoted value, skipping escaped characters
        let value_start = key_len + 1;
        let mut i = value_start + 1;
        while i < bytes.len() && bytes[i] != b'"' {
            if bytes[i] == b'\\' {
                i += 1;
            }
            i += 1;
        }
        if i >= bytes.len() {
            self.rest = "";
            return None;
        }

        let quoted = &tag[value_start..=i];
        self.rest = &tag[i + 1..];
        Some((key, quoted))
    }
}

/// Strips the surrounding double quotes and resolves escape sequences.
/// A raw newline or a `\'` escape makes the value invalid.
fn unquote(quoted: &str) -> Option<String> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c == '\n' {
            return None;
        }
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            'a' => '\x07',
            'b' => '\x08',
            'f' => '\x0c',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\x0b',
            '\\' => '\\',
            '"' => '"',
            'x' => hex_char(&mut chars, 2)?,
            'u' => hex_char(&mut chars, 4)?,
            'U' => hex_char(&mut chars, 8)?,
            d @ '0'..='7' => {
                let mut value = d.to_digit(8)?;
                for _ in 0..2 {
                    value = value * 8 + chars.next()?.to_digit(8)?;
                }
                if value > 0xff {
                    return None;
                }
                char::from_u32(value)?
            }
            _ => return None,
        };
        out.push(escaped);
    }
    Some(out)
}

fn hex_char(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_single_key() {
        let tag = StructTag::new(r#"json:"metadata,omitempty""#);
        assert_eq!(tag.lookup("json").as_deref(), Some("metadata,omitempty"));
        assert_eq!(tag.lookup("yaml"), None);
    }

    #[test]
    fn test_lookup_multiple_keys() {
        let tag = StructTag::new(r#"json:"spec"  protobuf:"bytes,2,opt,name=spec""#);
        assert_eq!(tag.get("json"), "spec");
        assert_eq!(tag.get("protobuf"), "bytes,2,opt,name=spec");
        assert_eq!(tag.get("xml"), "");
    }

    #[test]
    fn test_empty_value_is_present() {
        let tag = StructTag::new(r#"json:"""#);
        assert_eq!(tag.lookup("json").as_deref(), Some(""));
    }

    #[test]
    fn test_first_key_wins() {
        let tag = StructTag::new(r#"json:"first" json:"second""#);
        assert_eq!(tag.get("json"), "first");
        assert_eq!(tag.to_map().get("json").map(String::as_str), Some("first"));
    }

    #[test]
    fn test_escapes() {
        let tag = StructTag::new(r#"desc:"say \"hi\"\t\x41é\101""#);
        assert_eq!(tag.get("desc"), "say \"hi\"\tAéA");
    }

    #[test]
    fn test_invalid_escape_is_absent() {
        let tag = StructTag::new(r#"json:"meta\qdata""#);
        assert_eq!(tag.lookup("json"), None);
    }

    #[test]
    fn test_syntax_error_stops_parsing() {
        // Missing quotes on the second entry hides everything after it
        let tag = StructTag::new(r#"json:"name" yaml:name xml:"name""#);
        assert_eq!(tag.get("json"), "name");
        assert_eq!(tag.lookup("yaml"), None);
        assert_eq!(tag.lookup("xml"), None);

        // A space between key and colon is not allowed
        assert_eq!(StructTag::new(r#"json :"name""#).lookup("json"), None);
        // Unterminated value
        assert_eq!(StructTag::new(r#"json:"name"#).lookup("json"), None);
    }

    #[test]
    fn test_not_a_tag() {
        assert_eq!(StructTag::new("").lookup("json"), None);
        assert_eq!(StructTag::new("   ").lookup("json"), None);
        assert_eq!(StructTag::new("json").lookup("json"), None);
        assert!(StructTag::new("metadata").to_map().is_empty());
    }

    #[test]
    fn test_invalid_double_quoted_values() {
        // Single-quote escapes and raw newlines are not allowed in a
        // double-quoted value
        assert_eq!(StructTag::new(r#"json:"it\'s""#).lookup("json"), None);
        assert_eq!(StructTag::new("json:\"meta\ndata\"").lookup("json"), None);
        // An escaped newline is fine
        assert_eq!(StructTag::new(r#"json:"a\nb""#).get("json"), "a\nb");
    }

    #[test]
    fn test_to_map_agrees_with_lookup() {
        let tag = StructTag::new(r#"json:"bad\q" json:"metadata" yaml:"name""#);
        assert_eq!(tag.lookup("json"), None);

        let map = tag.to_map();
        assert!(!map.contains_key("json"));
        assert_eq!(map.get("yaml").map(String::as_str), Some("name"));
    }

    #[test]
    fn test_to_map() {
        let map = StructTag::new(r#"json:"items" protobuf:"bytes,2,rep,name=items""#).to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["json"], "items");
        assert_eq!(map["protobuf"], "bytes,2,rep,name=items");
    }
}

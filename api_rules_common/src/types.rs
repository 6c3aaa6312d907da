// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Read-only view of the declared types handed to API rules.
//!
//! The type graph itself is built elsewhere; rules only ever see a [`Type`]
//! by reference and never mutate it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully qualified identity of a type, e.g. package
/// `k8s.io/apimachinery/pkg/apis/meta/v1` and name `ObjectMeta`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, Default)]
pub struct Name {
    #[serde(default)]
    pub package: String,
    pub name: String,
}

impl Name {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// A name without a package, as used for builtins like `string`.
    pub fn builtin(name: impl Into<String>) -> Self {
        Self::new("", name)
    }
}

/// Canonical form: `package.Name`, or just `Name` when there is no package.
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.package, self.name)
        }
    }
}

// Compare against canonical identity strings without allocating
impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        if self.package.is_empty() {
            return self.name == other;
        }
        other
            .strip_prefix(self.package.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .is_some_and(|rest| rest == self.name)
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// The kind of a declared type. Only `Struct` carries members.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Builtin,
    Struct,
    Map,
    Slice,
    Array,
    Pointer,
    Alias,
    Interface,
    Func,
    Chan,
    Unsupported,
}

/// A single field of a struct type.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Member {
    /// Declared field identifier. For embedded members this is the
    /// embedded type's short name.
    pub name: String,
    /// Identity of the field's declared type
    pub type_ref: Name,
    /// True if the field is declared by type alone and its fields are promoted
    #[serde(default)]
    pub embedded: bool,
    /// Raw struct tag, e.g. `json:"metadata,omitempty" protobuf:"bytes,1,opt"`
    #[serde(default)]
    pub tags: String,
}

impl Member {
    /// A regular, named field.
    pub fn named(name: impl Into<String>, type_ref: Name, tags: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref,
            embedded: false,
            tags: tags.into(),
        }
    }

    /// An embedded field. Its name is the embedded type's short name.
    pub fn embedded(type_ref: Name, tags: impl Into<String>) -> Self {
        Self {
            name: type_ref.name.clone(),
            type_ref,
            embedded: true,
            tags: tags.into(),
        }
    }
}

/// A declared type as seen by the rules.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Type {
    pub name: Name,
    pub kind: Kind,
    /// Struct fields in declaration order. Empty for every other kind.
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Type {
    pub fn new_struct(name: Name, members: Vec<Member>) -> Self {
        Self {
            name,
            kind: Kind::Struct,
            members,
        }
    }

    pub fn new(name: Name, kind: Kind) -> Self {
        Self {
            name,
            kind,
            members: Vec::new(),
        }
    }
}

// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::ApiRule;
use anyhow::Result;
use api_rules_common::{Kind, Member, StructTag, Type};
use tracing::{debug, trace};


/// Embedded types that must keep the `metadata` serialized field name.
pub const METADATA_TYPES: &[&str] = &[
    "k8s.io/apimachinery/pkg/apis/meta/v1.ListMeta",
    "k8s.io/apimachinery/pkg/apis/meta/v1.ObjectMeta",
];

/// Serialized name required for embedded [`METADATA_TYPES`] fields.
pub const METADATA_FIELD_NAME: &str = "metadata";

///
/// Checks that embedded `ListMeta` and `ObjectMeta` fields are serialized
/// under the `metadata` JSON field name rather than spliced into the
/// enclosing type.
///
/// Only struct types are checked. Named fields and other embedded types
/// always pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct NamingConvention;

impl NamingConvention {
    pub const NAME: &'static str = "naming_convention";

    pub fn new() -> Self {
        Self
    }
}

impl ApiRule for NamingConvention {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, t: &Type) -> Result<Vec<String>> {
        if t.kind != Kind::Struct {
            trace!(type_name = %t.name, kind = ?t.kind, "skipping non-struct type");
            return Ok(Vec::new());
        }

        let fields = t
            .members
            .iter()
            .filter(|m| !matches_naming_convention(m))
            .inspect(|m| {
                debug!(
                    rule = Self::NAME,
                    type_name = %t.name,
                    field = %m.name,
                    embedded_type = %m.type_ref,
                    "embedded metadata is not serialized as \"metadata\""
                )
            })
            .map(|m| m.name.clone())
            .collect();

        Ok(fields)
    }
}

fn matches_naming_convention(m: &Member) -> bool {
    if !m.embedded {
        return true;
    }
    if !METADATA_TYPES.iter().any(|&canonical| m.type_ref == canonical) {
        return true;
    }

    match StructTag::new(&m.tags).lookup("json") {
        Some(json_tag) => json_tag.split(',').next() == Some(METADATA_FIELD_NAME),
        None => false,
    }
}

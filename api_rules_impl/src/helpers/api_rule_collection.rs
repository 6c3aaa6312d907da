use std::fmt;

use anyhow::{Context, Result};
use api_rules_common::Type;
use tracing::debug;

use crate::{ApiRule, NamingConvention};

/// A single field of a type that broke a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRuleViolation {
    pub rule_name: String,
    pub package: String,
    pub type_name: String,
    /// Empty when the type as a whole violates the rule
    pub field: String,
}

impl fmt::Display for ApiRuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API rule violation: {},{},{},{}",
            self.rule_name, self.package, self.type_name, self.field
        )
    }
}

///
/// Collects a set of API rules ready to run against
/// declared types.
///
pub struct ApiRuleCollection {
    rules: Vec<Box<dyn ApiRule>>,
}

impl ApiRuleCollection {
    pub fn new(rules: Vec<Box<dyn ApiRule>>) -> ApiRuleCollection {
        ApiRuleCollection { rules }
    }

    /// Every rule this crate provides
    pub fn default_rules() -> ApiRuleCollection {
        ApiRuleCollection::new(vec![Box::new(NamingConvention)])
    }

    pub fn rules(&self) -> &Vec<Box<dyn ApiRule>> {
        &self.rules
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    ///
    /// Runs every rule against `t`, in registration order. Violations of
    /// one rule keep the field order that rule reported them in.
    ///
    pub fn validate(&self, t: &Type) -> Result<Vec<ApiRuleViolation>> {
        let mut violations = Vec::new();

        for rule in &self.rules {
            let fields = rule.validate(t).with_context(|| {
                format!("Rule '{}' failed to validate {}", rule.name(), t.name)
            })?;

            debug!(
                rule = rule.name(),
                type_name = %t.name,
                violations = fields.len(),
                "validated type"
            );

            violations.extend(fields.into_iter().map(|field| ApiRuleViolation {
                rule_name: rule.name().to_string(),
                package: t.name.package.clone(),
                type_name: t.name.name.clone(),
                field,
            }));
        }

        Ok(violations)
    }
}

impl Default for ApiRuleCollection {
    fn default() -> Self {
        Self::default_rules()
    }
}

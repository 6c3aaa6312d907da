use anyhow::Result;
use api_rules_common::Type;

///
/// One of our API rules. A rule looks at a single declared type and
/// reports the fields of that type which break it.
///
/// Every rule shares the same two-method shape so the host can hold them
/// in one [`crate::ApiRuleCollection`] and run them uniformly.
pub trait ApiRule: Sync + Send {
    ///
    /// Returns the name of the rule. This is the stable identifier used when
    /// reporting violations and when configuring suppressions.
    ///
    fn name(&self) -> &str;

    ///
    /// Evaluates the rule on `t` and returns the names of the fields in the
    /// type that violate it, in declaration order. An empty list means the
    /// type conforms. A single empty field name (`[""]`) means the type as a
    /// whole violates the rule.
    ///
    /// `Err` is reserved for rules that can fail to evaluate, e.g. because a
    /// lookup they depend on is unavailable. It never carries a violation.
    fn validate(&self, t: &Type) -> Result<Vec<String>>;
}

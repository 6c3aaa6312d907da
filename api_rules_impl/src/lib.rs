pub mod helpers;

mod api_rule;
pub mod rules;

// Re-export our public API
pub use api_rule::ApiRule;
pub use helpers::api_rule_collection::ApiRuleCollection;
pub use helpers::api_rule_collection::ApiRuleViolation;
pub use rules::NamingConvention;

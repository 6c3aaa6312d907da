//!
//! api_rules
//!
//! Pluggable rules that lint declared type descriptors before code generation
//! or API review. A host hands each declared [`Type`] to the rules and reports
//! whatever field names come back.
//!
//! ```
//! use api_rules::{ApiRule, Member, Name, NamingConvention, Type};
//!
//! let list = Type::new_struct(
//!     Name::new("example.com/widgets/v1", "WidgetList"),
//!     vec![Member::embedded(
//!         Name::new("k8s.io/apimachinery/pkg/apis/meta/v1", "ListMeta"),
//!         r#"json:"metadata,omitempty""#,
//!     )],
//! );
//!
//! assert!(NamingConvention.validate(&list).unwrap().is_empty());
//! ```

pub use api_rules_common::{Kind, Member, Name, StructTag, Type, TypeUniverse};
pub use api_rules_impl::{ApiRule, ApiRuleCollection, ApiRuleViolation, NamingConvention};
pub use api_rules_impl::rules::{METADATA_FIELD_NAME, METADATA_TYPES};

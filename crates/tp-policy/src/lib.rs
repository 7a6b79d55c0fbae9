//! Rule model and strategy executors for TerraPolicy
//!
//! Rules are a closed tagged union validated at load time: an unknown rule
//! kind or malformed params fails the load, never a later execution. The
//! one deliberate exception is the `version_policy` strategy string, whose
//! unrecognized values are a compliance failure reported at execution time.

pub mod attrpath;
pub mod error;
pub mod exec;
pub mod load;
pub mod model;

pub use error::{Error, Result};
pub use exec::attributes::{ResourceContext, execute_attributes_policy};
pub use exec::version::execute_version_policy;
pub use load::load_rule_set;
pub use model::{
    AttributeStrategy, AttributesPolicyParams, ExecutionFlags, OneOrMany, Outcome, ProviderRule,
    ResourceRule, RuleSet, VersionPolicyParams, VersionStrategy,
};

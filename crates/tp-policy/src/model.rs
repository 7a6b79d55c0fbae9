//! Rule set data model

use serde::Deserialize;

/// Process-wide execution policy, applied uniformly to every rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionFlags {
    /// Escalate "schema information unavailable" from a warning to a
    /// policy failure.
    pub strict: bool,
}

/// The single aggregate result of one rule execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Fail { reason: String },
    Remediate,
}

impl Outcome {
    pub fn fail(reason: impl Into<String>) -> Self {
        Self::Fail {
            reason: reason.into(),
        }
    }
}

/// The full collection of provider and resource rules for one run.
/// Immutable once loaded.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    #[serde(default)]
    pub providers: Vec<ProviderRule>,
    #[serde(default)]
    pub resources: Vec<ResourceRule>,
}

/// A rule evaluated against declared provider versions.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
pub enum ProviderRule {
    VersionPolicy(VersionPolicyParams),
}

impl ProviderRule {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::VersionPolicy(_) => "version_policy",
        }
    }
}

/// A rule evaluated against resource blocks in configuration files.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
pub enum ResourceRule {
    AttributesPolicy(AttributesPolicyParams),
}

impl ResourceRule {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AttributesPolicy(_) => "attributes_policy",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionPolicyParams {
    pub provider: String,
    pub value: OneOrMany,
    pub strategy: VersionStrategy,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributesPolicyParams {
    pub resource: String,
    /// Dotted attribute path, e.g. `identity.type`.
    pub attribute: String,
    pub value: serde_yaml::Value,
    pub strategy: AttributeStrategy,
}

/// A target value that may be written as a scalar or a list in YAML.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::One(one) => std::slice::from_ref(one),
            Self::Many(many) => many,
        };
        slice.iter().map(String::as_str)
    }
}

/// Version rule strategies. Unrecognized strings load as `Unknown` and are
/// reported as a compliance failure when the rule executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStrategy {
    MinimumVersion,
    Exclude,
    #[serde(other)]
    Unknown,
}

/// Attribute rule strategies. Closed set, validated at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeStrategy {
    SetIfMissing,
    ForceSet,
    FailIfMissing,
    FailIfSet,
}

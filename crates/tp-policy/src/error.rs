//! Error types for tp-policy

use std::path::PathBuf;

/// Result type for tp-policy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or executing rules.
///
/// These are all setup errors. A rule that evaluates to non-compliance is
/// not an error; it is the `Fail` outcome.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot read rule set at {path}: {source}")]
    RuleSetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed rule set at {path}: {source}")]
    RuleSetParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Schema(#[from] tp_schema::Error),

    #[error(transparent)]
    Version(#[from] tp_version::Error),
}

//! Error types for tp-schema

use std::path::PathBuf;

/// Result type for tp-schema operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tp-schema operations
///
/// "Attribute or resource not present in the schema" is not an error; it is
/// modelled as `Option::None` by the lookup APIs so callers can apply the
/// strictness knob.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Schema query for provider {provider} in {dir} failed: {message}")]
    Source {
        provider: String,
        dir: PathBuf,
        message: String,
    },

    #[error("No schema published for provider {provider}")]
    ProviderNotInOutput { provider: String },

    #[error("Cannot coerce value to {expected}: {message}")]
    Coercion { expected: String, message: String },

    #[error("Malformed schema JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn coercion(expected: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Coercion {
            expected: expected.into(),
            message: message.into(),
        }
    }
}

//! Error types for tp-version

/// Result type for tp-version operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing version text
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Version text did not match expected pattern: {input:?}")]
    UnmatchedVersion { input: String },

    #[error("Tool output is missing the `Terraform vX.Y.Z` banner")]
    MissingBanner,
}

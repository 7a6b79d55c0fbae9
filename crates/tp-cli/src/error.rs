//! Error types for tp-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] tp_core::Error),

    #[error(transparent)]
    Policy(#[from] tp_policy::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Non-compliance rather than breakage.
    pub fn is_policy_failure(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_policy_failure())
    }
}

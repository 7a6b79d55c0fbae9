//! Error types for tp-hcl

/// Result type for tp-hcl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing HCL text
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl Error {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

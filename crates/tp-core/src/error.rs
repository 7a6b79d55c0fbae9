//! Error types for tp-core

use std::path::PathBuf;

/// Result type for tp-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while orchestrating a run.
///
/// `PolicyFailure` is the one reported condition: the infrastructure is
/// non-compliant. Everything else means the tool itself could not complete,
/// and callers must keep the two apart in their status mapping.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A rule evaluated to `Fail`.
    #[error("Policy failed: {reason}")]
    PolicyFailure { reason: String },

    /// A provider rule asked for remediation, which this engine cannot do
    /// for provider declarations.
    #[error("Provider rule `{kind}` cannot be remediated")]
    ProviderRemediation { kind: String },

    #[error("terraform init must run before terrapolicy in {dir}")]
    NotInitialized { dir: PathBuf },

    #[error("Failed to invoke `{command}`: {message}")]
    ToolInvocation { command: String, message: String },

    #[error("Malformed module manifest at {path}: {source}")]
    ModuleManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Fs(#[from] tp_fs::Error),

    #[error(transparent)]
    Hcl(#[from] tp_hcl::Error),

    #[error(transparent)]
    Policy(#[from] tp_policy::Error),

    #[error(transparent)]
    Schema(#[from] tp_schema::Error),

    #[error(transparent)]
    Version(#[from] tp_version::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the reported "your infrastructure is non-compliant"
    /// condition, as opposed to a setup error.
    pub fn is_policy_failure(&self) -> bool {
        matches!(self, Self::PolicyFailure { .. })
    }
}

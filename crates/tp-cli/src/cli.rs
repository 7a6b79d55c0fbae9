//! CLI argument parsing using clap derive

use clap::Parser;
use std::path::PathBuf;

/// Default rule-set file name, looked up under the working directory when
/// `--config` is not given.
pub const DEFAULT_POLICY_NAME: &str = ".terrapolicy.yaml";

/// TerraPolicy - enforce and remediate configuration policies
#[derive(Parser, Debug)]
#[command(name = "terrapolicy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Location of the YAML rule set (defaults to <dir>/.terrapolicy.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Working directory holding the configuration to check
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Fail when schema information for an attribute is unavailable
    #[arg(long)]
    pub strict: bool,

    /// Write remediated content to a .terrapolicy.tf sibling instead of
    /// overwriting the original
    #[arg(long)]
    pub rename: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The effective rule-set path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.dir.join(DEFAULT_POLICY_NAME))
    }
}

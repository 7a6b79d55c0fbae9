//! Orchestration layer for TerraPolicy
//!
//! Runs a loaded rule set against a working directory in two strictly
//! ordered phases: provider rules first, then resource rules over every
//! configuration file. Remediated documents are committed at the end with
//! a backup-and-replace protocol.
//!
//! ```text
//!        tp-cli
//!           |
//!        tp-core
//!           |
//!   +-------+-------+--------+--------+
//!   |       |       |        |        |
//! tp-fs  tp-hcl  tp-policy tp-schema tp-version
//! ```

pub mod engine;
pub mod error;
pub mod terraform;

pub use engine::{Engine, RunSummary};
pub use error::{Error, Result};
pub use terraform::{TerraformCli, VersionSource, config_file_paths, ensure_initialized};

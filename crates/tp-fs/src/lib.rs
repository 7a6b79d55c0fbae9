//! Filesystem layer for TerraPolicy
//!
//! Provides safe I/O primitives (atomic locked writes), `.tf` file
//! discovery, and the backup-and-replace protocol used when committing
//! remediated configuration files.

pub mod discover;
pub mod error;
pub mod io;
pub mod replace;

pub use discover::list_tf_files;
pub use error::{Error, Result};
pub use io::{read_text, write_atomic};
pub use replace::{CommitMode, replace_with_backup};

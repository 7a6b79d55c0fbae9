//! Backup-and-replace commit protocol for remediated files

use crate::io::write_atomic;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the remediated content lands relative to the original file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// Back up the original to `.bak`, write new content at the original
    /// path.
    InPlace,
    /// Back up the original to `.bak`, write new content to a
    /// `<stem>.terrapolicy.<ext>` sibling. The original path ends up gone.
    RenamedSibling,
}

/// Commit remediated content for `path` under the given mode.
///
/// The original file is always preserved as a `.bak` sibling first, so a
/// failed run can be recovered by restoring backups and re-running.
pub fn replace_with_backup(path: &Path, content: &str, mode: CommitMode) -> Result<()> {
    let backup_path = backup_name(path);

    if mode == CommitMode::RenamedSibling {
        let sibling = sibling_name(path)?;
        tracing::info!(path = %path.display(), sibling = %sibling.display(), "writing remediated sibling");
        write_atomic(&sibling, content.as_bytes())?;
    }

    tracing::info!(path = %path.display(), backup = %backup_path.display(), "backing up original");
    fs::rename(path, &backup_path).map_err(|e| Error::io(path, e))?;

    if mode == CommitMode::InPlace {
        write_atomic(path, content.as_bytes())?;
    }

    Ok(())
}

fn backup_name(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// Derive `main.terrapolicy.tf` from `main.tf`.
fn sibling_name(path: &Path) -> Result<PathBuf> {
    let stem = path
        .file_stem()
        .ok_or_else(|| Error::BadFileName {
            path: path.to_path_buf(),
        })?
        .to_string_lossy();
    let ext = path
        .extension()
        .ok_or_else(|| Error::BadFileName {
            path: path.to_path_buf(),
        })?
        .to_string_lossy();

    Ok(path.with_file_name(format!("{stem}.terrapolicy.{ext}")))
}

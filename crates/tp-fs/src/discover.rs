//! Discovery of Terraform configuration files

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// List the `.tf` files directly under `dir`, in sorted path order.
///
/// Backups (`.bak`) and nested directories are not descended into; module
/// directories are enumerated separately by the caller.
pub fn list_tf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "tf") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_lists_only_tf_files_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.tf"), "").unwrap();
        fs::write(temp.path().join("a.tf"), "").unwrap();
        fs::write(temp.path().join("notes.md"), "").unwrap();
        fs::write(temp.path().join("a.tf.bak"), "").unwrap();
        fs::create_dir(temp.path().join("modules")).unwrap();

        let files = list_tf_files(temp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.tf", "b.tf"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(list_tf_files(&temp.path().join("absent")).is_err());
    }
}

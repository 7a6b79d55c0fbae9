//! Glue to the external terraform tool and workspace layout

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Source of `terraform version` output. The production implementation
/// shells out; tests inject canned output.
pub trait VersionSource: Send + Sync {
    fn version_output(&self, dir: &Path) -> Result<String>;
}

/// Version source backed by the real terraform binary.
#[derive(Debug, Default)]
pub struct TerraformCli;

impl VersionSource for TerraformCli {
    fn version_output(&self, dir: &Path) -> Result<String> {
        let output = Command::new("terraform")
            .arg("version")
            .current_dir(dir)
            .output()
            .map_err(|e| Error::ToolInvocation {
                command: "terraform version".to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::ToolInvocation {
                command: "terraform version".to_string(),
                message: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Refuse to run against a directory where `terraform init` has not been
/// run: there is no provider schema to query without it.
pub fn ensure_initialized(dir: &Path) -> Result<()> {
    if dir.join(".terraform").is_dir() {
        Ok(())
    } else {
        Err(Error::NotInitialized {
            dir: dir.to_path_buf(),
        })
    }
}

#[derive(Deserialize)]
struct ModulesManifest {
    #[serde(rename = "Modules", default)]
    modules: Vec<ModuleEntry>,
}

#[derive(Deserialize)]
struct ModuleEntry {
    #[serde(rename = "Dir")]
    dir: String,
}

/// All configuration files in scope for a run: `.tf` files directly under
/// `dir` plus those of every module listed in the init-time module
/// manifest. Deduplicated, sorted.
pub fn config_file_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = tp_fs::list_tf_files(dir)?;

    for module_dir in module_dirs(dir)? {
        paths.extend(tp_fs::list_tf_files(&module_dir)?);
    }

    paths.sort();
    paths.dedup();
    Ok(paths)
}

fn module_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let manifest_path = dir.join(".terraform/modules/modules.json");
    if !manifest_path.is_file() {
        return Ok(Vec::new());
    }

    let text = tp_fs::read_text(&manifest_path)?;
    let manifest: ModulesManifest =
        serde_json::from_str(&text).map_err(|source| Error::ModuleManifest {
            path: manifest_path,
            source,
        })?;

    let mut dirs = Vec::new();
    for module in &manifest.modules {
        // The root module lists itself with an empty dir.
        if module.dir.is_empty() || module.dir == "." {
            continue;
        }
        let module_path = dir.join(&module.dir);
        match module_path.canonicalize() {
            Ok(resolved) => dirs.push(resolved),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %module_path.display(), "module directory missing, skipping");
            }
            Err(e) => return Err(Error::Io(e)),
        }
    }

    Ok(dirs)
}

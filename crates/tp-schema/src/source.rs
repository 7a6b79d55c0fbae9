//! Schema source: where provider schemas come from

use crate::error::{Error, Result};
use crate::schema::{ProviderSchema, parse_provider_schemas};
use std::path::Path;
use std::process::Command;

/// The external authority that produces provider schemas.
///
/// The production implementation shells out to `terraform`; tests inject
/// in-memory fakes.
pub trait SchemaSource: Send + Sync {
    fn load(&self, provider: &str, dir: &Path) -> Result<ProviderSchema>;
}

/// Schema source backed by `terraform providers schema -json`.
#[derive(Debug, Default)]
pub struct TerraformCliSource;

impl SchemaSource for TerraformCliSource {
    fn load(&self, provider: &str, dir: &Path) -> Result<ProviderSchema> {
        tracing::debug!(provider, dir = %dir.display(), "querying provider schema");

        let output = Command::new("terraform")
            .args(["providers", "schema", "-json"])
            .current_dir(dir)
            .output()
            .map_err(|e| Error::Source {
                provider: provider.to_string(),
                dir: dir.to_path_buf(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::Source {
                provider: provider.to_string(),
                dir: dir.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let json = String::from_utf8_lossy(&output.stdout);
        parse_provider_schemas(&json, provider)
    }
}

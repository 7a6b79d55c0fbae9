//! Extraction of provider versions from `terraform version` output

use crate::error::{Error, Result};
use crate::version::Version;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static PROVIDER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)provider (\S+) (\S+)$").unwrap());

/// Parse the full output of `terraform version` into a map of provider name
/// to declared version.
///
/// The tool banner is recorded under the `"terraform"` key. Provider names
/// are reduced to their final registry path segment, so
/// `registry.terraform.io/hashicorp/azurerm` becomes `azurerm`.
pub fn parse_version_output(output: &str) -> Result<BTreeMap<String, Version>> {
    let banner = Version::parse_banner(output).map_err(|_| Error::MissingBanner)?;

    let mut versions = BTreeMap::new();
    for captures in PROVIDER_LINE.captures_iter(output) {
        let name = short_provider_name(&captures[1]);
        let version = Version::parse_declaration(&captures[2])?;
        tracing::debug!(provider = %name, %version, "parsed provider declaration");
        versions.insert(name, version);
    }

    versions.insert("terraform".to_string(), banner);
    Ok(versions)
}

fn short_provider_name(raw: &str) -> String {
    raw.rsplit('/').next().unwrap_or(raw).to_string()
}

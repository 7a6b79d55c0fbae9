//! Rule set loading

use crate::error::{Error, Result};
use crate::model::RuleSet;
use std::path::Path;

/// Load and validate a YAML rule set.
///
/// All structural validation happens here: unknown rule kinds and malformed
/// params surface as load errors, before any rule executes.
pub fn load_rule_set(path: &Path) -> Result<RuleSet> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::RuleSetRead {
        path: path.to_path_buf(),
        source,
    })?;

    let rule_set: RuleSet =
        serde_yaml::from_str(&text).map_err(|source| Error::RuleSetParse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        providers = rule_set.providers.len(),
        resources = rule_set.resources.len(),
        "loaded rule set"
    );
    Ok(rule_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_rule_set() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".terrapolicy.yaml");
        fs::write(
            &path,
            "resources:\n  - type: attributes_policy\n    params:\n      resource: r\n      attribute: a\n      value: v\n      strategy: force_set\n",
        )
        .unwrap();

        let rule_set = load_rule_set(&path).unwrap();
        assert_eq!(rule_set.resources.len(), 1);
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let temp = TempDir::new().unwrap();
        let err = load_rule_set(&temp.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, Error::RuleSetRead { .. }));
    }

    #[test]
    fn test_unregistered_kind_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".terrapolicy.yaml");
        fs::write(&path, "providers:\n  - type: nonexistent\n    params: {}\n").unwrap();

        let err = load_rule_set(&path).unwrap_err();
        assert!(matches!(err, Error::RuleSetParse { .. }));
    }
}

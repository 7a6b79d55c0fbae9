//! End-to-end tests for the policy engine
//!
//! These drive the full flow against real temp directories: rule-set
//! loading, provider and resource phases, remediation, and the
//! backup-and-replace commit. The terraform binary is replaced by fake
//! version and schema sources.

use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tp_core::{Engine, Error, VersionSource};
use tp_fs::CommitMode;
use tp_hcl::Document;
use tp_policy::{ExecutionFlags, load_rule_set};
use tp_schema::{AttrType, BlockSchema, ProviderSchema, SchemaSource};

const STORAGE_ACCOUNT_TF: &str = r#"resource "azurerm_storage_account" "example" {
  name = "examplestorage"
}
"#;

struct FakeSchemaSource;

impl SchemaSource for FakeSchemaSource {
    fn load(&self, _provider: &str, _dir: &Path) -> tp_schema::Result<ProviderSchema> {
        let mut tags = BlockSchema::default();
        tags.attributes.insert("owner".to_string(), AttrType::String);

        let mut identity = BlockSchema::default();
        identity
            .attributes
            .insert("type".to_string(), AttrType::String);

        let mut account = BlockSchema::default();
        account
            .attributes
            .insert("name".to_string(), AttrType::String);
        account.block_types.insert("tags".to_string(), tags);
        account.block_types.insert("identity".to_string(), identity);

        Ok(ProviderSchema::new(BTreeMap::from([(
            "azurerm_storage_account".to_string(),
            account,
        )])))
    }
}

struct FakeVersionSource {
    output: String,
}

impl VersionSource for FakeVersionSource {
    fn version_output(&self, _dir: &Path) -> tp_core::Result<String> {
        Ok(self.output.clone())
    }
}

fn setup_workspace(tf_files: &[(&str, &str)], policy: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join(".terraform")).unwrap();
    for (name, content) in tf_files {
        fs::write(temp.path().join(name), content).unwrap();
    }
    fs::write(temp.path().join(".terrapolicy.yaml"), policy).unwrap();
    temp
}

fn engine(dir: &Path, strict: bool, provider_version: &str) -> Engine {
    let rule_set = load_rule_set(&dir.join(".terrapolicy.yaml")).unwrap();
    Engine::new(rule_set, ExecutionFlags { strict }, dir)
        .with_schema_source(Arc::new(FakeSchemaSource))
        .with_version_source(Box::new(FakeVersionSource {
            output: format!(
                "Terraform v1.5.7\n+ provider registry.terraform.io/hashicorp/azurerm {provider_version}\n"
            ),
        }))
}

const SET_OWNER_POLICY: &str = r#"
resources:
  - type: attributes_policy
    params:
      resource: azurerm_storage_account
      attribute: tags.owner
      value: platform-team
      strategy: set_if_missing
"#;

#[test]
fn test_end_to_end_remediation_creates_missing_tags_block() {
    let temp = setup_workspace(&[("main.tf", STORAGE_ACCOUNT_TF)], SET_OWNER_POLICY);

    let summary = engine(temp.path(), false, "v3.0.0").run().unwrap();

    assert_eq!(summary.files_checked, 1);
    assert_eq!(summary.remediated.len(), 1);

    // Backup holds the original content.
    assert_eq!(
        fs::read_to_string(temp.path().join("main.tf.bak")).unwrap(),
        STORAGE_ACCOUNT_TF
    );

    // The rewritten file now carries tags { owner = "platform-team" }.
    let rewritten = fs::read_to_string(temp.path().join("main.tf")).unwrap();
    let doc = Document::parse(&rewritten).unwrap();
    let resource = doc.body.blocks().next().unwrap();
    let tags = resource.body.blocks_of_type("tags").next().unwrap();
    assert_eq!(
        tags.body.get_attribute("owner").unwrap().expr.text(),
        "\"platform-team\""
    );
}

#[test]
fn test_second_run_after_remediation_is_a_no_op() {
    let temp = setup_workspace(&[("main.tf", STORAGE_ACCOUNT_TF)], SET_OWNER_POLICY);

    engine(temp.path(), false, "v3.0.0").run().unwrap();
    let remediated = fs::read_to_string(temp.path().join("main.tf")).unwrap();

    let summary = engine(temp.path(), false, "v3.0.0").run().unwrap();

    assert!(summary.remediated.is_empty());
    assert_eq!(
        fs::read_to_string(temp.path().join("main.tf")).unwrap(),
        remediated
    );
}

#[test]
fn test_rename_mode_writes_sibling_instead_of_overwriting() {
    let temp = setup_workspace(&[("main.tf", STORAGE_ACCOUNT_TF)], SET_OWNER_POLICY);

    engine(temp.path(), false, "v3.0.0")
        .with_commit_mode(CommitMode::RenamedSibling)
        .run()
        .unwrap();

    assert!(!temp.path().join("main.tf").exists());
    assert_eq!(
        fs::read_to_string(temp.path().join("main.tf.bak")).unwrap(),
        STORAGE_ACCOUNT_TF
    );
    let sibling = fs::read_to_string(temp.path().join("main.terrapolicy.tf")).unwrap();
    assert!(sibling.contains("tags"));
}

#[test]
fn test_minimum_version_at_boundary_is_a_policy_failure() {
    let policy = r#"
providers:
  - type: version_policy
    params:
      provider: azurerm
      value: "1.2"
      strategy: minimum_version
"#;
    let temp = setup_workspace(&[("main.tf", STORAGE_ACCOUNT_TF)], policy);

    // Declared 1.2.4 against minimum 1.2: equal major/minor fails, by design.
    let err = engine(temp.path(), false, "v1.2.4").run().unwrap_err();
    assert!(err.is_policy_failure());

    // One minor above passes.
    engine(temp.path(), false, "v1.3.0").run().unwrap();
}

#[test]
fn test_excluded_version_line_is_a_policy_failure() {
    let policy = r#"
providers:
  - type: version_policy
    params:
      provider: azurerm
      value: ["2.3", "2.4"]
      strategy: exclude
"#;
    let temp = setup_workspace(&[("main.tf", STORAGE_ACCOUNT_TF)], policy);

    let err = engine(temp.path(), false, "v2.3.1").run().unwrap_err();
    assert!(err.is_policy_failure());

    engine(temp.path(), false, "v2.5.0").run().unwrap();
}

#[test]
fn test_provider_failure_commits_nothing() {
    let policy = r#"
providers:
  - type: version_policy
    params:
      provider: azurerm
      value: "9.9"
      strategy: minimum_version
resources:
  - type: attributes_policy
    params:
      resource: azurerm_storage_account
      attribute: tags.owner
      value: platform-team
      strategy: set_if_missing
"#;
    let temp = setup_workspace(&[("main.tf", STORAGE_ACCOUNT_TF)], policy);

    let err = engine(temp.path(), false, "v1.0.0").run().unwrap_err();

    assert!(err.is_policy_failure());
    assert!(!temp.path().join("main.tf.bak").exists());
    assert_eq!(
        fs::read_to_string(temp.path().join("main.tf")).unwrap(),
        STORAGE_ACCOUNT_TF
    );
}

#[test]
fn test_resource_failure_discards_earlier_dirty_files() {
    // `a.tf` would be remediated by the first rule; `z.tf` then fails the
    // second rule. Nothing may be committed.
    let no_location = r#"resource "azurerm_storage_account" "other" {
  name = "otherstorage"
}
"#;
    let policy = r#"
resources:
  - type: attributes_policy
    params:
      resource: azurerm_storage_account
      attribute: tags.owner
      value: platform-team
      strategy: set_if_missing
  - type: attributes_policy
    params:
      resource: azurerm_storage_account
      attribute: name
      value: unused
      strategy: fail_if_missing
"#;
    let account_without_name = "resource \"azurerm_storage_account\" \"x\" {\n  location = \"weu\"\n}\n";
    let temp = setup_workspace(
        &[("a.tf", no_location), ("z.tf", account_without_name)],
        policy,
    );

    let err = engine(temp.path(), false, "v3.0.0").run().unwrap_err();

    assert!(err.is_policy_failure());
    assert!(!temp.path().join("a.tf.bak").exists());
    assert!(!temp.path().join("z.tf.bak").exists());
    assert_eq!(
        fs::read_to_string(temp.path().join("a.tf")).unwrap(),
        no_location
    );
}

#[test]
fn test_strict_mode_turns_missing_schema_into_failure() {
    let policy = r#"
resources:
  - type: attributes_policy
    params:
      resource: azurerm_storage_account
      attribute: not_in_schema
      value: x
      strategy: force_set
"#;
    let temp = setup_workspace(&[("main.tf", STORAGE_ACCOUNT_TF)], policy);

    // Non-strict: skipped with a warning, run succeeds untouched.
    let summary = engine(temp.path(), false, "v3.0.0").run().unwrap();
    assert!(summary.remediated.is_empty());

    // Strict: policy failure, still no commit.
    let err = engine(temp.path(), true, "v3.0.0").run().unwrap_err();
    assert!(err.is_policy_failure());
    assert!(!temp.path().join("main.tf.bak").exists());
}

#[test]
fn test_unregistered_rule_kind_is_a_setup_error() {
    let temp = setup_workspace(
        &[("main.tf", STORAGE_ACCOUNT_TF)],
        "resources:\n  - type: tags_policy\n    params: {}\n",
    );

    let err = load_rule_set(&temp.path().join(".terrapolicy.yaml")).unwrap_err();
    assert!(matches!(err, tp_policy::Error::RuleSetParse { .. }));
}

#[test]
fn test_uninitialized_directory_is_a_setup_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("main.tf"), STORAGE_ACCOUNT_TF).unwrap();
    fs::write(temp.path().join(".terrapolicy.yaml"), SET_OWNER_POLICY).unwrap();

    let err = engine(temp.path(), false, "v3.0.0").run().unwrap_err();

    assert!(matches!(err, Error::NotInitialized { .. }));
    assert!(!err.is_policy_failure());
}

#[test]
fn test_module_files_are_in_scope() {
    let temp = setup_workspace(&[("main.tf", "")], SET_OWNER_POLICY);
    fs::create_dir_all(temp.path().join("modules/storage")).unwrap();
    fs::write(
        temp.path().join("modules/storage/storage.tf"),
        STORAGE_ACCOUNT_TF,
    )
    .unwrap();
    fs::create_dir_all(temp.path().join(".terraform/modules")).unwrap();
    fs::write(
        temp.path().join(".terraform/modules/modules.json"),
        r#"{"Modules":[{"Key":"storage","Source":"./modules/storage","Dir":"modules/storage"}]}"#,
    )
    .unwrap();

    let summary = engine(temp.path(), false, "v3.0.0").run().unwrap();

    assert_eq!(summary.files_checked, 2);
    assert_eq!(summary.remediated.len(), 1);
    assert!(
        temp.path()
            .join("modules/storage/storage.tf.bak")
            .exists()
    );
}

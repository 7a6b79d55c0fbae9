//! Two-phase policy engine

use crate::error::{Error, Result};
use crate::terraform::{self, TerraformCli, VersionSource};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tp_fs::CommitMode;
use tp_hcl::Document;
use tp_policy::{
    ExecutionFlags, Outcome, ProviderRule, ResourceRule, RuleSet,
    exec::attributes::{ResourceContext, execute_attributes_policy},
    exec::version::execute_version_policy,
};
use tp_schema::{SchemaCache, SchemaSource, TerraformCliSource};

/// What a completed run did.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_checked: usize,
    /// Paths committed through the backup-and-replace protocol.
    pub remediated: Vec<PathBuf>,
}

/// The policy engine for one run.
///
/// Owns the rule set, the execution flags, and the run-scoped schema cache.
/// Evaluation is single-threaded and strictly ordered: every provider rule
/// runs before any resource rule, and the first `Fail` or error aborts the
/// run without committing pending remediations.
pub struct Engine {
    rule_set: RuleSet,
    flags: ExecutionFlags,
    dir: PathBuf,
    commit_mode: CommitMode,
    schemas: SchemaCache,
    versions: Box<dyn VersionSource>,
}

impl Engine {
    /// Engine with production collaborators: the terraform CLI for both
    /// versions and schemas, committing remediations in place.
    pub fn new(rule_set: RuleSet, flags: ExecutionFlags, dir: impl Into<PathBuf>) -> Self {
        Self {
            rule_set,
            flags,
            dir: dir.into(),
            commit_mode: CommitMode::InPlace,
            schemas: SchemaCache::new(Arc::new(TerraformCliSource)),
            versions: Box::new(TerraformCli),
        }
    }

    pub fn with_commit_mode(mut self, mode: CommitMode) -> Self {
        self.commit_mode = mode;
        self
    }

    pub fn with_schema_source(mut self, source: Arc<dyn SchemaSource>) -> Self {
        self.schemas = SchemaCache::new(source);
        self
    }

    pub fn with_version_source(mut self, source: Box<dyn VersionSource>) -> Self {
        self.versions = source;
        self
    }

    /// Run the full rule set.
    ///
    /// Returns `Err(Error::PolicyFailure)` for non-compliance and other
    /// errors for setup failures; see [`Error::is_policy_failure`].
    pub fn run(&self) -> Result<RunSummary> {
        tracing::info!(dir = %self.dir.display(), "starting terrapolicy");
        terraform::ensure_initialized(&self.dir)?;

        self.run_provider_rules()?;
        self.run_resource_rules()
    }

    fn run_provider_rules(&self) -> Result<()> {
        if self.rule_set.providers.is_empty() {
            return Ok(());
        }

        tracing::info!("starting provider rules");
        let output = self.versions.version_output(&self.dir)?;
        tracing::debug!(%output, "tool version output");
        let current = tp_version::parse_version_output(&output)?;
        tracing::info!(?current, "declared provider versions");

        for rule in &self.rule_set.providers {
            tracing::info!(kind = rule.kind(), "processing provider rule");
            let outcome = match rule {
                ProviderRule::VersionPolicy(params) => {
                    execute_version_policy(params, &current)?
                }
            };

            match outcome {
                Outcome::Success => {}
                Outcome::Fail { reason } => return Err(Error::PolicyFailure { reason }),
                // Provider declarations cannot be auto-edited.
                Outcome::Remediate => {
                    return Err(Error::ProviderRemediation {
                        kind: rule.kind().to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    fn run_resource_rules(&self) -> Result<RunSummary> {
        tracing::info!("starting resource rules");
        let paths = terraform::config_file_paths(&self.dir)?;
        tracing::debug!(?paths, "configuration files in scope");

        let mut remediations: HashMap<PathBuf, Document> = HashMap::new();
        let mut summary = RunSummary::default();

        for path in paths {
            tracing::info!(path = %path.display(), "processing file");
            let mut document = Document::parse(&tp_fs::read_text(&path)?)?;
            summary.files_checked += 1;
            let mut dirty = false;

            for rule in &self.rule_set.resources {
                tracing::info!(kind = rule.kind(), "processing resource rule");
                let outcome = match rule {
                    ResourceRule::AttributesPolicy(params) => {
                        let ctx = ResourceContext {
                            working_dir: &self.dir,
                            flags: self.flags,
                            schemas: &self.schemas,
                        };
                        execute_attributes_policy(params, &mut document, &ctx)?
                    }
                };

                match outcome {
                    Outcome::Success => {}
                    Outcome::Fail { reason } => return Err(Error::PolicyFailure { reason }),
                    Outcome::Remediate => dirty = true,
                }
            }

            if dirty {
                remediations.insert(path, document);
            }
        }

        for (path, document) in remediations {
            self.commit(&path, &document)?;
            summary.remediated.push(path);
        }

        Ok(summary)
    }

    fn commit(&self, path: &Path, document: &Document) -> Result<()> {
        tp_fs::replace_with_backup(path, &document.to_text(), self.commit_mode)?;
        Ok(())
    }
}

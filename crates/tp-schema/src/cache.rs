//! Run-scoped schema client cache

use crate::error::Result;
use crate::schema::ProviderSchema;
use crate::source::SchemaSource;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Cache of constructed provider schemas, keyed by `(provider, working dir)`.
///
/// The cache is an explicit object owned by the orchestrator for the
/// lifetime of one run. A single lock guards the check-or-create section,
/// so at most one construction happens per key even under concurrent
/// callers. Construction failures are not cached; a later call with the
/// same key retries. There is no eviction: the number of entries is bounded
/// by the distinct `(provider, dir)` pairs seen in one run.
pub struct SchemaCache {
    source: Arc<dyn SchemaSource>,
    clients: Mutex<HashMap<(String, PathBuf), Arc<ProviderSchema>>>,
}

impl SchemaCache {
    pub fn new(source: Arc<dyn SchemaSource>) -> Self {
        Self {
            source,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached schema for the key, constructing it on first use.
    pub fn get(&self, provider: &str, dir: &Path) -> Result<Arc<ProviderSchema>> {
        let key = (provider.to_string(), dir.to_path_buf());

        let mut clients = self.clients.lock().expect("schema cache lock poisoned");
        if let Some(schema) = clients.get(&key) {
            tracing::debug!(provider, dir = %dir.display(), "using cached schema client");
            return Ok(Arc::clone(schema));
        }

        tracing::debug!(provider, dir = %dir.display(), "constructing schema client");
        let schema = Arc::new(self.source.load(provider, dir)?);
        clients.insert(key, Arc::clone(&schema));
        Ok(schema)
    }
}

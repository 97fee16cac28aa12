//! In-process key-value store for tests and single-node development.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::store::{KeyValueStore, StoreResult};

/// HashMap-backed store guarded by an async RwLock.
///
/// Contents live only as long as the process. Used by the test suite and as
/// the startup fallback when Redis is not configured; production deployments
/// should set `REDIS_URL`.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates a new empty MemoryStore.
    pub fn new() -> Self {
        debug!("Using MemoryStore (non-durable)");

        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    async fn put_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        let mut entries = self.entries.write().await;

        if entries.contains_key(key) {
            return Ok(false);
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

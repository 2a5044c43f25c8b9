//! In-memory distributed cache
//!
//! Process-local stand-in for a cache server, used when no Redis endpoint is
//! configured and by tests. Behaves like the Redis client: keys are prefixed
//! with the instance name and reads restart sliding windows.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{keys, CacheStats, CacheStore, DistributedCache, EntryOptions, Result};

/// Thread-safe cache backed by a shared [`CacheStore`].
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<CacheStore>>,
    instance_name: String,
}

impl MemoryCache {
    /// Creates a cache over `store` with an empty instance name.
    pub fn new(store: CacheStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            instance_name: String::new(),
        }
    }

    /// Sets the prefix applied to every key.
    pub fn with_instance_name(mut self, instance_name: impl Into<String>) -> Self {
        self.instance_name = instance_name.into();
        self
    }

    /// Shared handle to the underlying store, for the cleanup task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        self.store.clone()
    }

    /// Snapshot of the store's counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Returns true if a live entry exists for the logical key.
    ///
    /// Does not restart the sliding window.
    pub async fn contains(&self, key: &str) -> bool {
        self.store.read().await.contains(&self.physical_key(key))
    }

    fn physical_key(&self, key: &str) -> String {
        keys::instance_key(&self.instance_name, key)
    }
}

#[async_trait]
impl DistributedCache for MemoryCache {
    async fn get_string(&self, key: &str) -> Result<Option<String>> {
        let value = self.store.write().await.get(&self.physical_key(key));
        debug!(key, hit = value.is_some(), "Memory cache lookup");
        Ok(value)
    }

    async fn set_string(&self, key: &str, value: &str, options: &EntryOptions) -> Result<()> {
        self.store
            .write()
            .await
            .set(self.physical_key(key), value.to_string(), options);
        debug!(key, persistent = options.is_persistent(), "Cached value");
        Ok(())
    }

    async fn refresh(&self, key: &str) -> Result<()> {
        self.store.write().await.refresh(&self.physical_key(key));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let removed = self.store.write().await.remove(&self.physical_key(key));
        debug!(key, removed, "Removed cache key");
        Ok(())
    }
}

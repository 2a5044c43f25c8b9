//! Distributed cache contract.

use async_trait::async_trait;

use super::{EntryOptions, Result};

/// String-valued key-value cache shared across process instances.
///
/// The catalog only ever talks to the cache through this trait, so an
/// in-memory fake and a Redis server are interchangeable. Implementations
/// namespace keys with their instance name; callers pass logical keys.
#[async_trait]
pub trait DistributedCache: Send + Sync {
    /// Reads a value, restarting its sliding window.
    ///
    /// Returns `None` if the key is absent or has expired.
    async fn get_string(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous value and expiration.
    async fn set_string(&self, key: &str, value: &str, options: &EntryOptions) -> Result<()>;

    /// Restarts the sliding window of a key without reading it.
    async fn refresh(&self, key: &str) -> Result<()>;

    /// Removes a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

//! Expired Entry Cleanup Task
//!
//! Background task that periodically purges expired entries from the
//! in-memory cache. Lookups already drop expired entries lazily; the sweep
//! bounds memory held by keys nobody reads again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that purges expired cache entries every
/// `cleanup_interval_secs` seconds.
///
/// Returns the task's JoinHandle so shutdown can abort it.
///
/// # Example
/// ```ignore
/// let cache = MemoryCache::new(CacheStore::new(1000));
/// let cleanup_handle = spawn_cleanup_task(cache.store(), 1);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    store: Arc<RwLock<CacheStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.write().await.purge_expired();

            if removed > 0 {
                info!("Cache cleanup: removed {} expired entries", removed);
            } else {
                debug!("Cache cleanup: no expired entries found");
            }
        }
    })
}

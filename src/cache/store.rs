//! Cache Store Module
//!
//! Synchronous cache engine combining LRU-ordered storage with sliding and
//! absolute expiration. Wrapped by [`MemoryCache`](crate::cache::MemoryCache)
//! for async access.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use crate::cache::{CacheEntry, CacheStats, Clock, EntryOptions, SystemClock};

// == Cache Store ==
/// Bounded key-value storage with LRU eviction and expiration.
#[derive(Debug)]
pub struct CacheStore {
    /// Entries in least-recently-used order
    entries: LruCache<String, CacheEntry>,
    /// Activity counters
    stats: CacheStats,
    /// Time source for expiration checks
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `max_entries` entries.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(max_entries: usize) -> Self {
        Self::with_clock(max_entries, Arc::new(SystemClock))
    }

    /// Creates a new CacheStore reading time from `clock`.
    pub fn with_clock(max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::new(),
            clock,
        }
    }

    // == Set ==
    /// Stores a value, replacing any previous entry and its expiration.
    ///
    /// If the cache is at capacity, the least recently used entry is evicted.
    pub fn set(&mut self, key: String, value: String, options: &EntryOptions) {
        let entry = CacheEntry::new(value, options, self.clock.now_ms());

        if let Some((displaced, _)) = self.entries.push(key.clone(), entry) {
            if displaced != key {
                self.stats.record_eviction();
            }
        }

        self.stats.record_write();
        self.sync_len();
    }

    // == Get ==
    /// Retrieves a live value and restarts its sliding window.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let now = self.clock.now_ms();

        let expired = match self.entries.peek(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.pop(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            self.sync_len();
            return None;
        }

        let value = self.entries.get_mut(key).map(|entry| {
            entry.touch(now);
            entry.value.clone()
        });
        self.stats.record_hit();
        value
    }

    // == Refresh ==
    /// Restarts the sliding window of a live entry without reading it.
    ///
    /// Returns false if the key is absent or already expired.
    pub fn refresh(&mut self, key: &str) -> bool {
        let now = self.clock.now_ms();
        match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired(now) => {
                entry.touch(now);
                true
            }
            _ => false,
        }
    }

    // == Contains ==
    /// Returns true if a live entry exists, without touching it.
    pub fn contains(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .peek(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    // == Remove ==
    /// Removes an entry by key.
    ///
    /// Returns true if an entry was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.pop(key).is_some();
        if removed {
            self.stats.record_removal();
            self.sync_len();
        }
        removed
    }

    // == Purge Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.pop(key.as_str());
        }

        self.stats.record_expirations(expired.len());
        self.sync_len();
        expired.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    /// Returns the current number of entries, expired ones included until
    /// they are touched or purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sync_len(&mut self) {
        self.stats.set_total_entries(self.entries.len());
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use std::time::Duration;

    const WINDOW: Duration = Duration::from_secs(300);

    fn store_with_clock(max_entries: usize) -> (CacheStore, ManualClock) {
        let clock = ManualClock::new(1_700_000_000_000);
        (CacheStore::with_clock(max_entries, Arc::new(clock.clone())), clock)
    }

    fn sliding() -> EntryOptions {
        EntryOptions::sliding(WINDOW)
    }

    #[test]
    fn test_store_set_and_get() {
        let (mut store, _) = store_with_clock(100);

        store.set("key1".to_string(), "value1".to_string(), &sliding());

        assert_eq!(store.get("key1").as_deref(), Some("value1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let (mut store, _) = store_with_clock(100);
        assert!(store.get("nonexistent").is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_remove() {
        let (mut store, _) = store_with_clock(100);

        store.set("key1".to_string(), "value1".to_string(), &sliding());

        assert!(store.remove("key1"));
        assert!(!store.remove("key1"));
        assert!(store.is_empty());
        assert!(store.get("key1").is_none());
    }

    #[test]
    fn test_store_overwrite_resets_expiration() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1".to_string(), "value1".to_string(), &sliding());
        clock.advance(Duration::from_secs(200));
        store.set("key1".to_string(), "value2".to_string(), &sliding());
        clock.advance(Duration::from_secs(200));

        assert_eq!(store.get("key1").as_deref(), Some("value2"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_sliding_expiration() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1".to_string(), "value1".to_string(), &sliding());
        clock.advance(WINDOW);

        assert!(store.get("key1").is_none());
        let stats = store.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_store_reads_keep_entry_alive() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1".to_string(), "value1".to_string(), &sliding());
        for _ in 0..5 {
            clock.advance(Duration::from_secs(240));
            assert!(store.get("key1").is_some());
        }
    }

    #[test]
    fn test_store_refresh() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1".to_string(), "value1".to_string(), &sliding());
        clock.advance(Duration::from_secs(240));
        assert!(store.refresh("key1"));
        clock.advance(Duration::from_secs(240));

        assert!(store.get("key1").is_some());
        assert!(!store.refresh("missing"));
    }

    #[test]
    fn test_store_persistent_entry_never_expires() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1".to_string(), "value1".to_string(), &EntryOptions::default());
        clock.advance(Duration::from_secs(365 * 24 * 3600));

        assert!(store.get("key1").is_some());
    }

    #[test]
    fn test_store_lru_eviction() {
        let (mut store, _) = store_with_clock(3);

        store.set("key1".to_string(), "value1".to_string(), &sliding());
        store.set("key2".to_string(), "value2".to_string(), &sliding());
        store.set("key3".to_string(), "value3".to_string(), &sliding());

        // Touch key1 so key2 becomes the oldest
        store.get("key1");
        store.set("key4".to_string(), "value4".to_string(), &sliding());

        assert_eq!(store.len(), 3);
        assert!(store.get("key1").is_some());
        assert!(store.get("key2").is_none());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_zero_capacity_holds_one_entry() {
        let (mut store, _) = store_with_clock(0);

        store.set("a".to_string(), "1".to_string(), &sliding());
        store.set("b".to_string(), "2".to_string(), &sliding());

        assert_eq!(store.len(), 1);
        assert!(store.get("b").is_some());
    }

    #[test]
    fn test_store_purge_expired() {
        let (mut store, clock) = store_with_clock(100);

        let short = EntryOptions::sliding(Duration::from_secs(1));
        store.set("short".to_string(), "v".to_string(), &short);
        store.set("long".to_string(), "v".to_string(), &sliding());
        clock.advance(Duration::from_secs(2));

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("long").is_some());
    }

    #[test]
    fn test_store_stats() {
        let (mut store, _) = store_with_clock(100);

        store.set("key1".to_string(), "value1".to_string(), &sliding());
        store.get("key1");
        store.get("nonexistent");
        store.remove("key1");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.removals, 1);
        assert_eq!(stats.total_entries, 0);
    }
}

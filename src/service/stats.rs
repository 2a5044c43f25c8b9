//! Catalog statistics
//!
//! Lock-free counters describing how often the cache answered a lookup.

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counters updated by every catalog lookup.
#[derive(Debug, Default)]
pub struct CatalogStats {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    decode_failures: AtomicU64,
    store_reads: AtomicU64,
}

impl CatalogStats {
    pub fn record_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_read(&self) {
        self.store_reads.fetch_add(1, Ordering::Relaxed);
    }

    /// Copies the current counter values.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            store_reads: self.store_reads.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`CatalogStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub decode_failures: u64,
    pub store_reads: u64,
}

impl StatsSnapshot {
    /// Returns hits / (hits + misses), or 0.0 if nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}

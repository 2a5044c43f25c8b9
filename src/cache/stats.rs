//! Cache Statistics Module
//!
//! Tracks in-memory cache activity: hits, misses, writes, removals,
//! expirations and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Counters for the in-memory cache.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads that found a live entry
    pub hits: u64,
    /// Reads that found nothing or an expired entry
    pub misses: u64,
    /// Successful writes
    pub writes: u64,
    /// Explicit removals of an existing entry
    pub removals: u64,
    /// Entries dropped because their deadline passed
    pub expirations: u64,
    /// Entries dropped to make room for new ones
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

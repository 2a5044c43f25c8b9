//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with sliding and
//! absolute expiration.

use std::time::Duration;

use crate::cache::EntryOptions;

// == Cache Entry ==
/// Represents a single cache entry with value and expiration metadata.
///
/// All timestamps are Unix milliseconds taken from the cache's clock.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Last write or successful read
    pub last_accessed: u64,
    /// Sliding window in milliseconds, None = no sliding expiration
    pub sliding_ms: Option<u64>,
    /// Hard deadline, None = no absolute expiration
    pub absolute_expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry written at `now`.
    pub fn new(value: String, options: &EntryOptions, now: u64) -> Self {
        Self {
            value,
            last_accessed: now,
            sliding_ms: options.sliding_expiration.map(duration_ms),
            absolute_expires_at: options
                .absolute_expiration
                .map(|d| now.saturating_add(duration_ms(d))),
        }
    }

    // == Expires At ==
    /// Returns the instant the entry expires if it is not touched again.
    ///
    /// The sliding deadline never extends past the absolute one.
    pub fn expires_at(&self) -> Option<u64> {
        let sliding = self
            .sliding_ms
            .map(|window| self.last_accessed.saturating_add(window));
        match (sliding, self.absolute_expires_at) {
            (Some(s), Some(a)) => Some(s.min(a)),
            (Some(s), None) => Some(s),
            (None, a) => a,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now` reaches its deadline.
    pub fn is_expired(&self, now: u64) -> bool {
        self.expires_at().is_some_and(|deadline| now >= deadline)
    }

    // == Touch ==
    /// Restarts the sliding window at `now`.
    pub fn touch(&mut self, now: u64) {
        self.last_accessed = now;
    }
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
pub(crate) fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

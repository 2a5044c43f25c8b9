//! Cache Entry Options Module
//!
//! Expiration policy attached to each cache write.

use std::time::Duration;

/// Sliding window applied to every catalog cache entry.
pub const DEFAULT_SLIDING_EXPIRATION: Duration = Duration::from_secs(5 * 60);

// == Entry Options ==
/// Expiration policy for a single cache write.
///
/// With a sliding window the entry expires once it has gone unread for the
/// whole window. With an absolute expiration it expires at that point no
/// matter how often it is read. When both are set the earlier deadline wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryOptions {
    /// Idle period after which the entry expires
    pub sliding_expiration: Option<Duration>,
    /// Lifetime measured from the write
    pub absolute_expiration: Option<Duration>,
}

impl EntryOptions {
    /// Options with only a sliding window.
    pub fn sliding(window: Duration) -> Self {
        Self {
            sliding_expiration: Some(window),
            absolute_expiration: None,
        }
    }

    /// Adds an absolute lifetime measured from the write.
    pub fn with_absolute_expiration(mut self, lifetime: Duration) -> Self {
        self.absolute_expiration = Some(lifetime);
        self
    }

    /// Returns true when neither expiration is set.
    pub fn is_persistent(&self) -> bool {
        self.sliding_expiration.is_none() && self.absolute_expiration.is_none()
    }
}

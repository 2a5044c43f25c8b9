//! Cache Module
//!
//! Distributed cache contract used by the catalog, plus the in-memory and
//! Redis implementations of it.

mod clock;
mod distributed;
mod entry;
mod error;
pub mod keys;
mod memory;
mod options;
#[cfg(feature = "redis")]
mod redis_cache;
mod stats;
mod store;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use distributed::DistributedCache;
pub use entry::CacheEntry;
pub use error::{CacheError, Result};
pub use memory::MemoryCache;
pub use options::{EntryOptions, DEFAULT_SLIDING_EXPIRATION};
#[cfg(feature = "redis")]
pub use redis_cache::RedisCache;
pub use stats::CacheStats;
pub use store::CacheStore;

//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Connection strings are passed through to the backends untouched.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Redis endpoint; the in-memory cache is used when unset
    pub redis_url: Option<String>,
    /// Prefix applied to every cache key
    pub cache_instance_name: String,
    /// Relational store connection string; the in-memory store is used when unset
    pub database_url: Option<String>,
    /// Sliding expiration window in seconds for cached products
    pub sliding_expiration: u64,
    /// Maximum number of entries the in-memory cache can hold
    pub max_entries: usize,
    /// In-memory cache purge interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `REDIS_URL` - Redis endpoint, e.g. `redis://localhost:6379` (default: unset)
    /// - `CACHE_INSTANCE_NAME` - Cache key prefix (default: empty)
    /// - `DATABASE_URL` - Store connection string (default: unset)
    /// - `CACHE_SLIDING_EXPIRATION` - Sliding window in seconds (default: 300)
    /// - `CACHE_MAX_ENTRIES` - In-memory cache capacity (default: 1000)
    /// - `CLEANUP_INTERVAL` - Purge frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parsed("SERVER_PORT").unwrap_or(defaults.server_port),
            redis_url: non_empty("REDIS_URL"),
            cache_instance_name: env::var("CACHE_INSTANCE_NAME")
                .unwrap_or(defaults.cache_instance_name),
            database_url: non_empty("DATABASE_URL"),
            sliding_expiration: parsed("CACHE_SLIDING_EXPIRATION")
                .unwrap_or(defaults.sliding_expiration),
            max_entries: parsed("CACHE_MAX_ENTRIES").unwrap_or(defaults.max_entries),
            cleanup_interval: parsed("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Sliding window as a Duration.
    pub fn sliding_window(&self) -> Duration {
        Duration::from_secs(self.sliding_expiration)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            redis_url: None,
            cache_instance_name: String::new(),
            database_url: None,
            sliding_expiration: 300,
            max_entries: 1000,
            cleanup_interval: 1,
        }
    }
}

fn parsed<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

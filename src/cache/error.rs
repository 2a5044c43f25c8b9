//! Cache client errors.

use thiserror::Error;

/// Errors reported by a distributed cache client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The cache server could not be reached or dropped the connection.
    #[error("Cache connection failed: {0}")]
    Connection(String),
    /// The cache server rejected or failed the command.
    #[error("Cache operation failed: {0}")]
    Operation(String),
}

/// Result type for cache client operations.
pub type Result<T> = std::result::Result<T, CacheError>;

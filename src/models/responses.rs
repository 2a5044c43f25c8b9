//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies that are not
//! plain products.

use serde::Serialize;

use crate::service::StatsSnapshot;

/// Error body for every failed request.
///
/// `details` is only present on server errors and carries the underlying
/// backend message.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human readable summary
    pub message: String,
    /// Underlying error text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Creates an ErrorResponse without details.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    /// Creates an ErrorResponse carrying the underlying error text.
    pub fn with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups answered from the cache
    pub cache_hits: u64,
    /// Lookups that fell through to the store
    pub cache_misses: u64,
    /// Cached payloads that could not be decoded
    pub decode_failures: u64,
    /// Reads issued against the store
    pub store_reads: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<StatsSnapshot> for StatsResponse {
    fn from(stats: StatsSnapshot) -> Self {
        Self {
            cache_hits: stats.cache_hits,
            cache_misses: stats.cache_misses,
            decode_failures: stats.decode_failures,
            store_reads: stats.store_reads,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

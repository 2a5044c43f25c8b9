//! Error types for the product catalog
//!
//! Provides the catalog's error taxonomy using thiserror. Transport mapping
//! lives in [`crate::api::ApiError`].

use thiserror::Error;

use crate::cache::CacheError;
use crate::codec::CodecError;
use crate::store::StoreError;

// == Catalog Error Enum ==
/// Outcome of a failed catalog operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// No product with this identifier exists in the store
    #[error("Product with ID {0} not found.")]
    NotFound(i32),

    /// The path identifier and the body identifier of an update differ
    #[error("Product ID mismatch.")]
    IdMismatch { path_id: i32, body_id: i32 },

    /// The distributed cache failed
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The relational store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A value could not be encoded for the cache
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl CatalogError {
    /// Returns true for failures of the cache, the store or the codec.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            CatalogError::Cache(_) | CatalogError::Store(_) | CatalogError::Codec(_)
        )
    }
}

// == Result Type Alias ==
/// Convenience Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

//! Persistent Store Module
//!
//! Authoritative product storage behind the [`ProductRepository`] trait, with
//! an in-memory implementation and an optional PostgreSQL one.

mod memory;
#[cfg(feature = "postgres")]
mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Product;

pub use memory::{InMemoryProductRepository, RepositoryCalls};
#[cfg(feature = "postgres")]
pub use postgres::PgProductRepository;

/// Errors reported by a product repository.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The row changed or vanished between lookup and write.
    #[error("Product {0} was modified or deleted concurrently")]
    Conflict(i32),
    /// The database failed the query or could not be reached.
    #[error("Database error: {0}")]
    Database(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Relational store holding the authoritative product records.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Returns every product ordered by identifier.
    async fn list_all(&self) -> Result<Vec<Product>>;

    /// Looks up a product by identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>>;

    /// Persists the fields of an existing product in one transaction.
    ///
    /// Returns `StoreError::Conflict` if no row with that identifier exists.
    async fn save(&self, product: &Product) -> Result<()>;

    /// Deletes a product in one transaction.
    ///
    /// Returns `StoreError::Conflict` if no row with that identifier exists.
    async fn remove(&self, id: i32) -> Result<()>;
}

//! In-memory product repository.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ProductRepository, Result, StoreError};
use crate::models::Product;

/// Number of calls made to each repository operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryCalls {
    pub list_all: usize,
    pub find_by_id: usize,
    pub save: usize,
    pub remove: usize,
}

impl RepositoryCalls {
    /// Calls that read from the store.
    pub fn reads(&self) -> usize {
        self.list_all + self.find_by_id
    }

    /// Calls that wrote to the store.
    pub fn writes(&self) -> usize {
        self.save + self.remove
    }
}

/// Product store kept in process memory, ordered by identifier.
///
/// Counts every call so tests can assert when the store was consulted.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<BTreeMap<i32, Product>>,
    list_all_calls: AtomicUsize,
    find_by_id_calls: AtomicUsize,
    save_calls: AtomicUsize,
    remove_calls: AtomicUsize,
}

impl InMemoryProductRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `products`.
    ///
    /// A later product replaces an earlier one with the same identifier.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products.into_iter().map(|p| (p.id, p)).collect();
        Self {
            products: RwLock::new(products),
            ..Self::default()
        }
    }

    /// Returns the call counters.
    pub fn calls(&self) -> RepositoryCalls {
        RepositoryCalls {
            list_all: self.list_all_calls.load(Ordering::SeqCst),
            find_by_id: self.find_by_id_calls.load(Ordering::SeqCst),
            save: self.save_calls.load(Ordering::SeqCst),
            remove: self.remove_calls.load(Ordering::SeqCst),
        }
    }

    /// Reads a row without counting the call.
    pub async fn peek(&self, id: i32) -> Option<Product> {
        self.products.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>> {
        self.list_all_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn save(&self, product: &Product) -> Result<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        match self.products.write().await.get_mut(&product.id) {
            Some(row) => {
                *row = product.clone();
                Ok(())
            }
            None => Err(StoreError::Conflict(product.id)),
        }
    }

    async fn remove(&self, id: i32) -> Result<()> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        self.products
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::Conflict(id))
    }
}

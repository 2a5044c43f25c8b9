//! Product Catalog
//!
//! Cache-aside coordination for product reads and writes.
//!
//! Reads consult the cache first and populate it from the store on a miss.
//! Updates write through to the per-product key, deletes invalidate it. The
//! all-products key is only ever populated by [`ProductCatalog::list_all`]
//! and otherwise left to expire, so it can lag behind single-product writes
//! for up to one expiration window.
//!
//! There is no locking and no transaction spanning cache and store. A cache
//! failure after a successful store write is reported but not compensated;
//! the store stays authoritative.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::keys::{product_key, ALL_PRODUCTS_KEY};
use crate::cache::{DistributedCache, EntryOptions, DEFAULT_SLIDING_EXPIRATION};
use crate::codec;
use crate::error::{CatalogError, Result};
use crate::models::Product;
use crate::service::{CatalogStats, StatsSnapshot};
use crate::store::ProductRepository;

/// Cache-aside orchestrator over a distributed cache and a product store.
pub struct ProductCatalog {
    cache: Arc<dyn DistributedCache>,
    repository: Arc<dyn ProductRepository>,
    entry_options: EntryOptions,
    stats: CatalogStats,
}

impl ProductCatalog {
    /// Creates a catalog caching entries with the default five minute
    /// sliding window.
    pub fn new(cache: Arc<dyn DistributedCache>, repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            cache,
            repository,
            entry_options: EntryOptions::sliding(DEFAULT_SLIDING_EXPIRATION),
            stats: CatalogStats::default(),
        }
    }

    /// Overrides the sliding window applied to every cache write.
    pub fn with_sliding_expiration(mut self, window: Duration) -> Self {
        self.entry_options = EntryOptions::sliding(window);
        self
    }

    /// Returns the current hit/miss counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    // == List All ==
    /// Returns every product, from the cache when possible.
    ///
    /// On a miss the full list is read from the store and cached under the
    /// all-products key, even when it is empty.
    pub async fn list_all(&self) -> Result<Vec<Product>> {
        if let Some(products) = self
            .cached(ALL_PRODUCTS_KEY, codec::decode_products)
            .await?
        {
            return Ok(products);
        }

        let products = self.repository.list_all().await?;
        self.stats.record_store_read();

        let payload = codec::encode_products(&products)?;
        self.cache
            .set_string(ALL_PRODUCTS_KEY, &payload, &self.entry_options)
            .await?;
        debug!(count = products.len(), "Populated product list cache");

        Ok(products)
    }

    // == Get By Id ==
    /// Returns one product, from the cache when possible.
    ///
    /// A cached copy is trusted without checking the store. A product missing
    /// from the store is reported as `NotFound` and nothing is cached.
    pub async fn get_by_id(&self, id: i32) -> Result<Product> {
        let key = product_key(id);

        if let Some(product) = self.cached(&key, codec::decode_product).await? {
            return Ok(product);
        }

        let found = self.repository.find_by_id(id).await?;
        self.stats.record_store_read();
        let product = found.ok_or(CatalogError::NotFound(id))?;

        let payload = codec::encode_product(&product)?;
        self.cache
            .set_string(&key, &payload, &self.entry_options)
            .await?;
        debug!(id, "Populated product cache");

        Ok(product)
    }

    // == Update ==
    /// Overwrites a product in the store, then rewrites its cache entry.
    ///
    /// The replacement must carry the same identifier as `id`; otherwise the
    /// call fails with `IdMismatch` before touching either backend.
    pub async fn update(&self, id: i32, replacement: Product) -> Result<Product> {
        if replacement.id != id {
            return Err(CatalogError::IdMismatch {
                path_id: id,
                body_id: replacement.id,
            });
        }

        let mut product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        product.overwrite_from(replacement);
        self.repository.save(&product).await?;

        let payload = codec::encode_product(&product)?;
        self.cache
            .set_string(&product_key(id), &payload, &self.entry_options)
            .await?;
        info!(id, "Updated product");

        Ok(product)
    }

    // == Delete ==
    /// Removes a product from the store, then drops its cache entry.
    pub async fn delete(&self, id: i32) -> Result<()> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(CatalogError::NotFound(id));
        }

        self.repository.remove(id).await?;
        self.cache.remove(&product_key(id)).await?;
        info!(id, "Deleted product");

        Ok(())
    }

    /// Looks up and decodes a cached value.
    ///
    /// An absent key, an empty payload and an undecodable payload are all
    /// misses. Cache errors propagate.
    async fn cached<T>(
        &self,
        key: &str,
        decode: fn(&str) -> codec::Result<T>,
    ) -> Result<Option<T>> {
        let payload = match self.cache.get_string(key).await? {
            Some(payload) if !payload.is_empty() => payload,
            _ => {
                debug!(key, "Cache miss");
                self.stats.record_miss();
                return Ok(None);
            }
        };

        match decode(&payload) {
            Ok(value) => {
                debug!(key, "Cache hit");
                self.stats.record_hit();
                Ok(Some(value))
            }
            Err(e) => {
                warn!(key, error = %e, "Discarding undecodable cache entry");
                self.stats.record_decode_failure();
                self.stats.record_miss();
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheStore, ManualClock, MemoryCache};
    use crate::store::{InMemoryProductRepository, RepositoryCalls};

    struct Fixture {
        catalog: ProductCatalog,
        cache: MemoryCache,
        repository: Arc<InMemoryProductRepository>,
        clock: ManualClock,
    }

    fn fixture() -> Fixture {
        let clock = ManualClock::new(0);
        let cache = MemoryCache::new(CacheStore::with_clock(100, Arc::new(clock.clone())));
        let repository = Arc::new(InMemoryProductRepository::with_products(vec![
            Product::new(1, "Apple", "Fruits", 10.0, 50),
            Product::new(2, "Carrot", "Vegetables", 20.0, 75),
        ]));
        let catalog = ProductCatalog::new(Arc::new(cache.clone()), repository.clone());
        Fixture {
            catalog,
            cache,
            repository,
            clock,
        }
    }

    #[tokio::test]
    async fn test_get_by_id_populates_cache() {
        let f = fixture();

        let first = f.catalog.get_by_id(1).await.unwrap();
        let second = f.catalog.get_by_id(1).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(f.repository.calls().find_by_id, 1);
        assert!(f.cache.contains("Product_1").await);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_caches_nothing() {
        let f = fixture();

        let result = f.catalog.get_by_id(99).await;

        assert_eq!(result, Err(CatalogError::NotFound(99)));
        assert!(!f.cache.contains("Product_99").await);
        assert_eq!(f.cache.stats().await.writes, 0);
    }

    #[tokio::test]
    async fn test_store_lookup_counted_even_when_product_missing() {
        let f = fixture();

        let _ = f.catalog.get_by_id(99).await;

        assert_eq!(f.repository.calls().find_by_id, 1);
        assert_eq!(f.catalog.stats().store_reads, 1);
    }

    #[tokio::test]
    async fn test_list_all_populates_cache_once() {
        let f = fixture();

        f.catalog.list_all().await.unwrap();
        let products = f.catalog.list_all().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(f.repository.calls().list_all, 1);
        assert_eq!(f.cache.stats().await.writes, 1);
    }

    #[tokio::test]
    async fn test_list_all_caches_empty_list() {
        let cache = MemoryCache::new(CacheStore::new(10));
        let repository = Arc::new(InMemoryProductRepository::new());
        let catalog = ProductCatalog::new(Arc::new(cache.clone()), repository.clone());

        assert!(catalog.list_all().await.unwrap().is_empty());
        assert!(catalog.list_all().await.unwrap().is_empty());

        assert_eq!(repository.calls().list_all, 1);
        assert_eq!(
            cache.get_string(ALL_PRODUCTS_KEY).await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_undecodable_entry_falls_through_to_store() {
        let f = fixture();
        f.cache
            .set_string("Product_1", "{\"Id\":1,\"Na", &EntryOptions::default())
            .await
            .unwrap();

        let product = f.catalog.get_by_id(1).await.unwrap();

        assert_eq!(product.name, "Apple");
        assert_eq!(f.repository.calls().find_by_id, 1);
        assert_eq!(f.catalog.stats().decode_failures, 1);
        // The bad payload was replaced with a good one
        f.catalog.get_by_id(1).await.unwrap();
        assert_eq!(f.repository.calls().find_by_id, 1);
    }

    #[tokio::test]
    async fn test_empty_payload_is_a_miss() {
        let f = fixture();
        f.cache
            .set_string(ALL_PRODUCTS_KEY, "", &EntryOptions::default())
            .await
            .unwrap();

        assert_eq!(f.catalog.list_all().await.unwrap().len(), 2);
        assert_eq!(f.repository.calls().list_all, 1);
        assert_eq!(f.catalog.stats().decode_failures, 0);
    }

    #[tokio::test]
    async fn test_entry_expires_after_idle_window() {
        let f = fixture();

        f.catalog.get_by_id(1).await.unwrap();
        f.clock.advance(Duration::from_secs(5 * 60));
        f.catalog.get_by_id(1).await.unwrap();

        assert_eq!(f.repository.calls().find_by_id, 2);
    }

    #[tokio::test]
    async fn test_custom_sliding_expiration() {
        let f = fixture();
        let catalog = ProductCatalog::new(Arc::new(f.cache.clone()), f.repository.clone())
            .with_sliding_expiration(Duration::from_secs(10));

        catalog.get_by_id(2).await.unwrap();
        f.clock.advance(Duration::from_secs(10));

        assert!(!f.cache.contains("Product_2").await);
    }

    #[tokio::test]
    async fn test_unbounded_sliding_expiration_keeps_entry() {
        let f = fixture();
        let catalog = ProductCatalog::new(Arc::new(f.cache.clone()), f.repository.clone())
            .with_sliding_expiration(Duration::from_secs(u64::MAX));

        catalog.get_by_id(1).await.unwrap();
        f.clock.advance(Duration::from_secs(365 * 24 * 60 * 60));
        catalog.get_by_id(1).await.unwrap();

        assert_eq!(f.repository.calls().find_by_id, 1);
    }

    #[tokio::test]
    async fn test_update_rewrites_cache_and_leaves_list_alone() {
        let f = fixture();
        f.catalog.list_all().await.unwrap();
        f.catalog.get_by_id(1).await.unwrap();

        let updated = Product::new(1, "Pear", "Fruits", 12.0, 40);
        f.catalog.update(1, updated.clone()).await.unwrap();

        assert_eq!(f.catalog.get_by_id(1).await.unwrap(), updated);
        assert_eq!(f.repository.peek(1).await, Some(updated));
        // The list snapshot still holds the old name
        let listed = f.catalog.list_all().await.unwrap();
        assert_eq!(listed[0].name, "Apple");
    }

    #[tokio::test]
    async fn test_update_id_mismatch_touches_nothing() {
        let f = fixture();

        let result = f
            .catalog
            .update(1, Product::new(2, "Pear", "Fruits", 1.0, 1))
            .await;

        assert_eq!(
            result,
            Err(CatalogError::IdMismatch {
                path_id: 1,
                body_id: 2
            })
        );
        assert_eq!(f.repository.calls(), RepositoryCalls::default());
        assert_eq!(f.cache.stats().await.writes, 0);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let f = fixture();

        let result = f
            .catalog
            .update(7, Product::new(7, "Pear", "Fruits", 1.0, 1))
            .await;

        assert_eq!(result, Err(CatalogError::NotFound(7)));
        assert_eq!(f.repository.calls().save, 0);
    }

    #[tokio::test]
    async fn test_delete_invalidates_product_key() {
        let f = fixture();
        f.catalog.get_by_id(2).await.unwrap();

        f.catalog.delete(2).await.unwrap();

        assert!(!f.cache.contains("Product_2").await);
        assert_eq!(f.catalog.get_by_id(2).await, Err(CatalogError::NotFound(2)));
    }

    #[tokio::test]
    async fn test_delete_missing_product() {
        let f = fixture();

        assert_eq!(f.catalog.delete(3).await, Err(CatalogError::NotFound(3)));
        assert_eq!(f.repository.calls().remove, 0);
    }
}

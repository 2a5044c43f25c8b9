//! PostgreSQL product repository.
//!
//! Expects a `products` table:
//!
//! ```sql
//! CREATE TABLE products (
//!     id       INTEGER PRIMARY KEY,
//!     name     TEXT NOT NULL,
//!     category TEXT NOT NULL,
//!     price    DOUBLE PRECISION NOT NULL,
//!     quantity INTEGER NOT NULL
//! );
//! ```

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use tracing::{debug, info, warn};

use super::{ProductRepository, Result, StoreError};
use crate::models::Product;

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    StoreError::Database(err.to_string())
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    category: String,
    price: f64,
    quantity: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            category: row.category,
            price: row.price,
            quantity: row.quantity,
        }
    }
}

/// PostgreSQL-backed product repository.
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool to `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        info!("Connecting to PostgreSQL database...");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                map_sqlx_error(e)
            })?;

        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>> {
        debug!("Listing all products");

        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, category, price, quantity
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        debug!("Finding product by id: {}", id);

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, category, price, quantity
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Product::from))
    }

    async fn save(&self, product: &Product) -> Result<()> {
        debug!("Saving product: {}", product.id);

        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, category = $3, price = $4, quantity = $5
            WHERE id = $1
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.quantity)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict(product.id));
        }

        tx.commit().await.map_err(map_sqlx_error)
    }

    async fn remove(&self, id: i32) -> Result<()> {
        debug!("Deleting product: {}", id);

        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict(id));
        }

        tx.commit().await.map_err(map_sqlx_error)
    }
}

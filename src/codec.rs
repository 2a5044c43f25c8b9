//! Cache payload codec
//!
//! Converts products to and from the JSON text stored in the distributed
//! cache. Cached payloads use PascalCase field names (`Id`, `Name`, ...) so
//! entries written by earlier deployments of the catalog remain readable.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Product;

/// Errors that can occur while encoding or decoding a cache payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Failed to encode a value to text.
    #[error("Failed to encode cache payload: {0}")]
    Encode(String),
    /// Failed to decode text into a value.
    #[error("Failed to decode cache payload: {0}")]
    Decode(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Wire shape of a product inside the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CachedProduct {
    id: i32,
    name: String,
    category: String,
    price: f64,
    quantity: i32,
}

impl From<&Product> for CachedProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            quantity: product.quantity,
        }
    }
}

impl From<CachedProduct> for Product {
    fn from(cached: CachedProduct) -> Self {
        Product {
            id: cached.id,
            name: cached.name,
            category: cached.category,
            price: cached.price,
            quantity: cached.quantity,
        }
    }
}

/// Encodes a single product.
///
/// Fails for a non-finite price, which JSON cannot represent.
pub fn encode_product(product: &Product) -> Result<String> {
    ensure_finite(product)?;
    serde_json::to_string(&CachedProduct::from(product))
        .map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decodes a single product.
pub fn decode_product(text: &str) -> Result<Product> {
    serde_json::from_str::<CachedProduct>(text)
        .map(Product::from)
        .map_err(|e| CodecError::Decode(e.to_string()))
}

/// Encodes a product list.
pub fn encode_products(products: &[Product]) -> Result<String> {
    let cached = products
        .iter()
        .map(|product| ensure_finite(product).map(|_| CachedProduct::from(product)))
        .collect::<Result<Vec<_>>>()?;
    serde_json::to_string(&cached).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decodes a product list.
pub fn decode_products(text: &str) -> Result<Vec<Product>> {
    serde_json::from_str::<Vec<CachedProduct>>(text)
        .map(|cached| cached.into_iter().map(Product::from).collect())
        .map_err(|e| CodecError::Decode(e.to_string()))
}

fn ensure_finite(product: &Product) -> Result<()> {
    if product.price.is_finite() {
        Ok(())
    } else {
        Err(CodecError::Encode(format!(
            "product {} has a non-finite price",
            product.id
        )))
    }
}

//! Cache key naming for the product catalog.
//!
//! These logical keys must stay byte-for-byte stable: other deployments
//! sharing the cache read and write the same names.

/// Key holding the serialized list of every product.
pub const ALL_PRODUCTS_KEY: &str = "GET_ALL_PRODUCTS";

/// Prefix of per-product keys.
pub const PRODUCT_KEY_PREFIX: &str = "Product_";

/// Key holding a single serialized product.
#[must_use]
pub fn product_key(id: i32) -> String {
    format!("{}{}", PRODUCT_KEY_PREFIX, id)
}

/// Physical key under which a logical key is stored for an instance.
#[must_use]
pub fn instance_key(instance_name: &str, key: &str) -> String {
    format!("{}{}", instance_name, key)
}

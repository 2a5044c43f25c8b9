//! Product entity
//!
//! The single domain entity of the catalog.

use serde::{Deserialize, Serialize};

// == Product ==
/// A catalog product as stored in the relational store.
///
/// The identifier is assigned by the store and never changes after creation.
/// HTTP bodies use camelCase field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier
    pub id: i32,
    /// Display name
    pub name: String,
    /// Category label (e.g. "Fruits")
    pub category: String,
    /// Unit price, non-negative by convention
    pub price: f64,
    /// Units in stock
    pub quantity: i32,
}

impl Product {
    /// Creates a new Product.
    pub fn new(
        id: i32,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        quantity: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
            quantity,
        }
    }

    // == Overwrite ==
    /// Replaces every mutable field with the values of `replacement`.
    ///
    /// This is a full overwrite, not a merge. The identifier is left as is.
    pub fn overwrite_from(&mut self, replacement: Product) {
        self.name = replacement.name;
        self.category = replacement.category;
        self.price = replacement.price;
        self.quantity = replacement.quantity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product::new(1, "Apple", "Fruits", 12.5, 40);
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Apple");
        assert_eq!(json["category"], "Fruits");
        assert_eq!(json["price"], 12.5);
        assert_eq!(json["quantity"], 40);
    }

    #[test]
    fn test_product_deserialize_requires_id() {
        let json = r#"{"name":"Apple","category":"Fruits","price":1.0,"quantity":1}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_overwrite_replaces_all_mutable_fields() {
        let mut existing = Product::new(3, "Carrot", "Vegetables", 4.0, 10);
        existing.overwrite_from(Product::new(3, "Beet", "Roots", 0.0, 0));

        assert_eq!(existing, Product::new(3, "Beet", "Roots", 0.0, 0));
    }

    #[test]
    fn test_overwrite_keeps_identifier() {
        let mut existing = Product::new(3, "Carrot", "Vegetables", 4.0, 10);
        existing.overwrite_from(Product::new(99, "Beet", "Roots", 1.0, 2));

        assert_eq!(existing.id, 3);
    }
}

//! Catalog product model.

use common::{CategoryId, Money, ProductId};
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The category identifier.
    pub id: CategoryId,

    /// Human-readable category name.
    pub name: String,
}

/// A product as the catalog backend describes it.
///
/// The cart copies `name`, `price`, and `stock` out of this struct at
/// add-time; it never holds a `Product` itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// The product identifier.
    pub id: ProductId,

    /// Human-readable product name.
    pub name: String,

    /// Longer description shown on the detail page.
    pub description: String,

    /// Unit price.
    pub price: Money,

    /// Units currently available.
    pub stock: u32,

    /// Image URL, when the backend has one.
    pub image: Option<String>,

    /// The category this product belongs to, when assigned.
    pub category: Option<Category>,
}

impl Product {
    /// Returns true if at least one unit can be added to a cart.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: ProductId::new(3),
            name: "Kopi Arabika 250g".to_string(),
            description: "Single origin beans".to_string(),
            price: Money::from_rupiah(85_000),
            stock: 12,
            image: Some("/storage/products/kopi.jpg".to_string()),
            category: Some(Category {
                id: CategoryId::new(1),
                name: "Beverages".to_string(),
            }),
        }
    }

    #[test]
    fn test_in_stock() {
        let mut product = sample();
        assert!(product.in_stock());

        product.stock = 0;
        assert!(!product.in_stock());
    }

    #[test]
    fn test_product_serialization_roundtrip() {
        let product = sample();
        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(product, back);
    }
}

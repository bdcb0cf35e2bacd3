//! Cart line items.

use catalog::{Category, Product};
use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// One product's presence in the cart.
///
/// Everything except `quantity` is copied from the catalog at add-time
/// and stays fixed for the life of the line. `stock_limit` is the stock
/// observed then; mutations clamp against it so the quantity invariant
/// `1 <= quantity <= stock_limit` holds at all times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product this line is for.
    pub product_id: ProductId,

    /// Product name at add-time.
    pub name: String,

    /// Unit price at add-time.
    pub unit_price: Money,

    /// Image URL at add-time, when the catalog had one.
    pub image: Option<String>,

    /// Category at add-time, when assigned.
    pub category: Option<Category>,

    /// Stock observed at add-time; the quantity ceiling for this line.
    pub stock_limit: u32,

    /// Units of the product in the cart.
    pub quantity: u32,
}

impl LineItem {
    /// Creates a line for one unit of the given product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            stock_limit: product.stock,
            quantity: 1,
        }
    }

    /// Returns the price of this line (quantity * unit price).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }

    /// Returns true if the line already sits at its stock ceiling.
    pub fn at_stock_limit(&self) -> bool {
        self.quantity >= self.stock_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: u32) -> Product {
        Product {
            id: ProductId::new(11),
            name: "Gula Aren 500g".to_string(),
            description: String::new(),
            price: Money::from_rupiah(28_000),
            stock,
            image: None,
            category: None,
        }
    }

    #[test]
    fn test_from_product_starts_at_one() {
        let line = LineItem::from_product(&product(6));
        assert_eq!(line.quantity, 1);
        assert_eq!(line.stock_limit, 6);
        assert_eq!(line.unit_price, Money::from_rupiah(28_000));
    }

    #[test]
    fn test_line_total() {
        let mut line = LineItem::from_product(&product(6));
        line.quantity = 3;
        assert_eq!(line.line_total(), Money::from_rupiah(84_000));
    }

    #[test]
    fn test_at_stock_limit() {
        let mut line = LineItem::from_product(&product(2));
        assert!(!line.at_stock_limit());
        line.quantity = 2;
        assert!(line.at_stock_limit());
    }
}

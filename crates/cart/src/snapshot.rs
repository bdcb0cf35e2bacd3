//! The whole-cart snapshot value.

use catalog::Product;
use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::item::LineItem;

/// The serializable cart state: an ordered list of line items, unique
/// by product id.
///
/// All mutation methods uphold the cart invariants and report whether
/// they changed anything, so callers can skip redundant persistence.
/// Out-of-bounds requests clamp or do nothing; none of them fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    items: Vec<LineItem>,
}

impl CartSnapshot {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of the product.
    ///
    /// An existing line gains a unit unless it already sits at its
    /// stock limit. A new line starts at quantity 1, unless the product
    /// is out of stock, in which case nothing is added.
    pub fn add(&mut self, product: &Product) -> bool {
        if let Some(line) = self.line_mut(product.id) {
            if line.at_stock_limit() {
                return false;
            }
            line.quantity += 1;
            return true;
        }

        if !product.in_stock() {
            return false;
        }
        self.items.push(LineItem::from_product(product));
        true
    }

    /// Removes the line for the given product. No-op if absent.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.product_id != product_id);
        self.items.len() != before
    }

    /// Sets the quantity for an existing line, clamped to its stock
    /// limit. A quantity of zero removes the line. Unknown ids are
    /// ignored.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product_id);
        }
        let Some(line) = self.line_mut(product_id) else {
            return false;
        };
        let clamped = quantity.min(line.stock_limit);
        if line.quantity == clamped {
            return false;
        }
        line.quantity = clamped;
        true
    }

    /// Adds one unit to an existing line, clamped to its stock limit.
    pub fn increment(&mut self, product_id: ProductId) -> bool {
        let Some(line) = self.line_mut(product_id) else {
            return false;
        };
        if line.at_stock_limit() {
            return false;
        }
        line.quantity += 1;
        true
    }

    /// Removes one unit from an existing line. A line at quantity 1 is
    /// removed entirely; a zero-quantity line never exists.
    pub fn decrement(&mut self, product_id: ProductId) -> bool {
        let Some(line) = self.line_mut(product_id) else {
            return false;
        };
        if line.quantity == 1 {
            return self.remove(product_id);
        }
        line.quantity -= 1;
        true
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        true
    }

    /// Total units across all lines. Always derived, never stored.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|line| line.quantity as u64).sum()
    }

    /// Sum of line totals. Always derived, never stored.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Returns the line for a product, if present.
    pub fn line(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|line| line.product_id == product_id)
    }

    /// Returns all lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns true if the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}

//! Wire shapes for order placement and order history.

use chrono::{DateTime, Utc};
use common::{Money, OrderId, ProductId};
use serde::{Deserialize, Serialize};

use crate::status::OrderStatus;

/// One requested line in an order submission.
///
/// Deliberately price-free: the backend reprices every line from its
/// own catalog, so a stale client price can never leak into an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequestItem {
    /// The product being ordered.
    pub product_id: ProductId,

    /// Units requested.
    pub quantity: u32,
}

/// The order-creation request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// The requested lines.
    pub items: Vec<OrderRequestItem>,
}

impl OrderRequest {
    /// Creates a request from (product, quantity) pairs.
    pub fn new(items: Vec<OrderRequestItem>) -> Self {
        Self { items }
    }

    /// Total units across the request.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| item.quantity as u64).sum()
    }
}

/// What the backend returns when it accepts an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// The id the backend assigned.
    pub order_id: OrderId,

    /// Initial status, normally [`OrderStatus::Pending`].
    pub status: OrderStatus,

    /// The total the backend computed from its own prices.
    pub total: Money,

    /// When the backend recorded the order.
    pub created_at: DateTime<Utc>,
}

/// One line of a placed order, priced by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// The product ordered.
    pub product_id: ProductId,

    /// Product name at order time.
    pub name: String,

    /// Units ordered.
    pub quantity: u32,

    /// Unit price the backend charged.
    pub unit_price: Money,

    /// `quantity * unit_price` as the backend computed it.
    pub line_total: Money,
}

/// A placed order as the history endpoints report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// The order id.
    pub id: OrderId,

    /// Current status.
    pub status: OrderStatus,

    /// Backend-computed order total.
    pub total: Money,

    /// The priced lines.
    pub lines: Vec<OrderLine>,

    /// Stored payment proof file name, once uploaded.
    pub payment_proof: Option<String>,

    /// When the order was placed.
    pub created_at: DateTime<Utc>,

    /// When the backend last touched the order.
    pub updated_at: DateTime<Utc>,
}

impl OrderSummary {
    /// Total units across the order.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| line.quantity as u64).sum()
    }
}

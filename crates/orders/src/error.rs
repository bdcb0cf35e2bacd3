//! Order error types.

use common::{OrderId, ProductId};
use thiserror::Error;

/// Errors that can occur while placing or reading orders.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// The backend could not be reached.
    #[error("Order service unavailable: {0}")]
    Unavailable(String),

    /// The submission did not complete within the allowed window.
    #[error("Order submission timed out")]
    Timeout,

    /// The backend rejected the request; carries its message.
    #[error("{0}")]
    Rejected(String),

    /// The backend had less stock than the request asked for.
    #[error("Insufficient stock for product {product_id}: {available} left")]
    InsufficientStock {
        product_id: ProductId,
        available: u32,
    },

    /// A payload could not be serialized or parsed.
    #[error("Order payload error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The payment proof failed client-side validation.
    #[error("Invalid payment proof: {0}")]
    InvalidProof(String),

    /// No order exists with the given id.
    #[error("Order not found: {0}")]
    UnknownOrder(OrderId),
}

/// Convenience type alias for order results.
pub type Result<T> = std::result::Result<T, OrdersError>;

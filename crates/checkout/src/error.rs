//! Checkout error types.

use orders::OrdersError;
use thiserror::Error;

/// Errors surfaced by the checkout coordinator.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines. Nothing was sent to the backend.
    #[error("Cart is empty")]
    EmptyCart,

    /// A submission for this cart is still in flight.
    #[error("Checkout already in progress")]
    AlreadyInFlight,

    /// The backend failed or refused the order. Timeouts land here as
    /// [`OrdersError::Timeout`].
    #[error("Order submission failed: {0}")]
    Submission(#[from] OrdersError),
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;

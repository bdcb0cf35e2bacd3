//! Session error types.

use cart::CartError;
use catalog::CatalogError;
use checkout::CheckoutError;
use common::ProductId;
use orders::OrdersError;
use thiserror::Error;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The product id resolved to nothing in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The cart's storage slot failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// A catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A checkout attempt failed or was rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// An order history operation failed.
    #[error("Orders error: {0}")]
    Orders(#[from] OrdersError),
}

/// Convenience type alias for session results.
pub type Result<T> = std::result::Result<T, SessionError>;

//! Checkout coordination for the storefront.
//!
//! This crate provides:
//! - [`CheckoutCoordinator`]: drives a cart submission end to end
//! - [`CheckoutPhase`]: the submission state machine
//! - [`CheckoutReceipt`]: what a successful submission hands back
//!
//! A submission sends product ids and quantities only; the backend
//! prices the order from its own catalog. On success the order and
//! product caches are invalidated and the cart is cleared. On failure
//! the order cache is restored from a pre-submission snapshot and the
//! cart is left exactly as it was.

pub mod coordinator;
pub mod error;
pub mod phase;

pub use coordinator::{CheckoutCoordinator, CheckoutReceipt, DEFAULT_CHECKOUT_TIMEOUT};
pub use error::{CheckoutError, Result};
pub use phase::CheckoutPhase;

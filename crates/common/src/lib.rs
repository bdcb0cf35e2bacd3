//! Shared value types used across the storefront crates.

pub mod ids;
pub mod money;

pub use ids::{CategoryId, CheckoutId, OrderId, ProductId};
pub use money::Money;

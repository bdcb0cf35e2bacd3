//! Cart store for the storefront.
//!
//! The cart is a small in-memory list of line items with a durable
//! snapshot slot behind it:
//! - [`CartService`] applies mutations, clamps them against the stock
//!   snapshotted at add-time, and persists after every change
//! - [`CartStorage`] is the slot the serialized cart lands in, with
//!   [`InMemoryCartStorage`] and [`SqliteCartStorage`] implementations
//! - totals are always derived from the line items, never stored

pub mod error;
pub mod item;
pub mod memory;
pub mod service;
pub mod snapshot;
pub mod sqlite;
pub mod storage;

pub use error::{CartError, Result, StorageError};
pub use item::LineItem;
pub use memory::InMemoryCartStorage;
pub use service::{CartService, CheckoutHold};
pub use snapshot::CartSnapshot;
pub use sqlite::SqliteCartStorage;
pub use storage::{CART_SLOT, CartStorage};

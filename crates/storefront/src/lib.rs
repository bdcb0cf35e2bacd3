//! Session wiring for the storefront client core.
//!
//! A [`Session`] is the one object an embedding application holds: it
//! owns the cart service, the product and order caches, and the
//! checkout coordinator, and exposes the operations a storefront UI
//! drives. Collaborators (catalog gateway, order gateway, cart storage)
//! are injected at construction; there is no global state.

pub mod config;
pub mod error;
pub mod session;
pub mod telemetry;

pub use config::Config;
pub use error::{Result, SessionError};
pub use session::{CartTotals, Session};

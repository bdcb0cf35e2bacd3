//! Order placement and order history for the storefront.
//!
//! This crate owns the wire shapes and server contract:
//! - [`OrderRequest`] carries product ids and quantities only; the
//!   backend prices authoritatively
//! - [`OrderStatus`] is the closed status vocabulary of the backend
//! - [`OrderGateway`] is the endpoint trait, with
//!   [`InMemoryOrderGateway`] as a stock-enforcing local stand-in
//! - [`OrdersCache`] is the snapshot/restore-capable cached view the
//!   checkout coordinator manipulates optimistically

pub mod cache;
pub mod error;
pub mod gateway;
pub mod model;
pub mod proof;
pub mod status;

pub use cache::{OrdersCache, OrdersSnapshot};
pub use error::{OrdersError, Result};
pub use gateway::{InMemoryOrderGateway, OrderGateway};
pub use model::{OrderConfirmation, OrderLine, OrderRequest, OrderRequestItem, OrderSummary};
pub use proof::{MAX_PROOF_BYTES, PaymentProof};
pub use status::{OrderStatus, StatusTone};

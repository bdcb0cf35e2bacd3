//! The durable snapshot slot.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::snapshot::CartSnapshot;

/// Key of the slot the cart persists into.
///
/// One slot belongs to exactly one cart; nothing else writes to it.
pub const CART_SLOT: &str = "cart-storage";

/// A keyed durable slot holding the serialized cart.
///
/// Every save replaces the whole snapshot in one write, so a reader
/// never observes a partially-applied cart. Implementations serialize
/// the snapshot as a single JSON document.
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Loads the persisted snapshot. `None` when the slot is empty.
    async fn load(&self) -> Result<Option<CartSnapshot>, StorageError>;

    /// Replaces the slot contents with the given snapshot.
    async fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError>;

    /// Empties the slot.
    async fn clear(&self) -> Result<(), StorageError>;
}

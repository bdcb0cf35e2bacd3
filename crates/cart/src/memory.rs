use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::snapshot::CartSnapshot;
use crate::storage::CartStorage;

#[derive(Debug, Default)]
struct MemoryState {
    payload: Option<String>,
    save_count: u64,
    fail_on_save: bool,
}

/// In-memory snapshot slot for testing.
///
/// Holds the serialized document the way a durable slot would, so
/// parse failures and write counts behave like the real thing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartStorage {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryCartStorage {
    /// Creates a new empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many saves the slot has taken.
    pub async fn save_count(&self) -> u64 {
        self.state.read().await.save_count
    }

    /// Returns the raw persisted document, if any.
    pub async fn raw_payload(&self) -> Option<String> {
        self.state.read().await.payload.clone()
    }

    /// Replaces the raw persisted document, bypassing serialization.
    pub async fn set_raw_payload(&self, payload: impl Into<String>) {
        self.state.write().await.payload = Some(payload.into());
    }

    /// Configures the slot to fail subsequent saves and clears.
    pub async fn set_fail_on_save(&self, fail: bool) {
        self.state.write().await.fail_on_save = fail;
    }
}

#[async_trait]
impl CartStorage for InMemoryCartStorage {
    async fn load(&self) -> Result<Option<CartSnapshot>, StorageError> {
        let state = self.state.read().await;
        match &state.payload {
            Some(payload) => Ok(Some(serde_json::from_str(payload)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        if state.fail_on_save {
            return Err(StorageError::Database(sqlx::Error::PoolClosed));
        }
        state.payload = Some(serde_json::to_string(snapshot)?);
        state.save_count += 1;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        if state.fail_on_save {
            return Err(StorageError::Database(sqlx::Error::PoolClosed));
        }
        state.payload = None;
        Ok(())
    }
}

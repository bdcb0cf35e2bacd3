use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::StorageError;
use crate::snapshot::CartSnapshot;
use crate::storage::{CART_SLOT, CartStorage};

/// SQLite-backed snapshot slot.
///
/// The cart's durable home between sessions: one row per slot, replaced
/// wholesale by a single upsert per save.
#[derive(Clone)]
pub struct SqliteCartStorage {
    pool: SqlitePool,
    slot: String,
}

impl SqliteCartStorage {
    /// Creates a storage over an existing pool using the default slot.
    ///
    /// The caller is responsible for the schema; see
    /// [`SqliteCartStorage::initialize_schema`].
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_slot(pool, CART_SLOT)
    }

    /// Creates a storage over an existing pool with a custom slot key.
    pub fn with_slot(pool: SqlitePool, slot: impl Into<String>) -> Self {
        Self {
            pool,
            slot: slot.into(),
        }
    }

    /// Opens (creating if missing) the database at `url` and prepares
    /// the schema.
    ///
    /// A single connection is used; the slot has exactly one writer and
    /// in-memory databases exist per connection.
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let storage = Self::new(pool);
        storage.initialize_schema().await?;
        Ok(storage)
    }

    /// Creates the snapshot table if it does not exist yet.
    pub async fn initialize_schema(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cart_snapshot (
                slot TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                saved_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CartStorage for SqliteCartStorage {
    async fn load(&self) -> Result<Option<CartSnapshot>, StorageError> {
        let row = sqlx::query("SELECT payload FROM cart_snapshot WHERE slot = ?1")
            .bind(&self.slot)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let payload: String = row.try_get("payload")?;
                Ok(Some(serde_json::from_str(&payload)?))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        let payload = serde_json::to_string(snapshot)?;

        sqlx::query(
            r#"
            INSERT INTO cart_snapshot (slot, payload, saved_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(slot) DO UPDATE SET
                payload = excluded.payload,
                saved_at = excluded.saved_at
            "#,
        )
        .bind(&self.slot)
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM cart_snapshot WHERE slot = ?1")
            .bind(&self.slot)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

//! SQLite-backed slot storage.

use super::{SlotStorage, StorageError};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;

#[derive(Debug, Clone)]
pub struct SqliteSlotStorage {
    pool: SqlitePool,
}

impl SqliteSlotStorage {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteSlotStorage { pool }
    }
}

#[async_trait]
impl SlotStorage for SqliteSlotStorage {
    async fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT payload FROM slots WHERE name = ?")
            .bind(slot)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get::<String, _>("payload")))
    }

    async fn set(&self, slot: &str, payload: &str) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO slots (name, payload, updated_ms)
            VALUES (?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET
                payload = excluded.payload,
                updated_ms = excluded.updated_ms
            "#,
        )
        .bind(slot)
        .bind(payload)
        .bind(Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, slot: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM slots WHERE name = ?")
            .bind(slot)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

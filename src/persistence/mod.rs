//! Local durable storage for the in-progress trade.
//!
//! This module provides:
//! - The `SlotStorage` key-value abstraction (one named slot per snapshot)
//! - SQLite-backed and in-memory slot storage
//! - The `PersistenceBridge` snapshot codec with corruption recovery
//! - The mount-time restore state machine

pub mod bridge;
pub mod memory;
pub mod migrations;
pub mod restore;
pub mod sqlite;

pub use bridge::{has_restorable, BasisEntry, PersistenceBridge, Snapshot};
pub use memory::MemorySlotStorage;
pub use migrations::init_db;
pub use restore::{RestoreState, RestoreStatus};
pub use sqlite::SqliteSlotStorage;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Named-slot key-value store holding serialized snapshots.
#[async_trait]
pub trait SlotStorage: Send + Sync + fmt::Debug {
    /// Read the raw payload of a slot, if present.
    async fn get(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    async fn set(&self, slot: &str, payload: &str) -> Result<(), StorageError>;

    /// Delete a slot. Deleting an absent slot is not an error.
    async fn remove(&self, slot: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

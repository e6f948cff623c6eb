//! In-memory slot storage for tests and ephemeral sessions.

use super::{SlotStorage, StorageError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with a raw payload, valid JSON or not.
    pub fn with_slot(mut self, slot: &str, payload: &str) -> Self {
        self.slots
            .get_mut()
            .insert(slot.to_string(), payload.to_string());
        self
    }
}

#[async_trait]
impl SlotStorage for MemorySlotStorage {
    async fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.read().await.get(slot).cloned())
    }

    async fn set(&self, slot: &str, payload: &str) -> Result<(), StorageError> {
        self.slots
            .write()
            .await
            .insert(slot.to_string(), payload.to_string());
        Ok(())
    }

    async fn remove(&self, slot: &str) -> Result<(), StorageError> {
        self.slots.write().await.remove(slot);
        Ok(())
    }
}

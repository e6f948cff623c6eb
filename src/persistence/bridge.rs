//! Snapshot codec between the selection store and a storage slot.

use super::{SlotStorage, StorageError};
use crate::domain::{IdentityKey, ItemId, ItemInstance, Side, ValuationBasis};
use crate::engine::{count_of, BasisMap, SelectionStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Persisted form of the store: `{ "offering": [...], "requesting": [...] }`.
///
/// `basis` is only written when basis persistence is enabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub offering: Vec<ItemInstance>,
    pub requesting: Vec<ItemInstance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis: Option<Vec<BasisEntry>>,
}

/// One persisted valuation-basis choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasisEntry {
    pub side: Side,
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_name: Option<String>,
    pub basis: ValuationBasis,
}

impl Snapshot {
    /// Rebuild a store. Basis entries whose identity is not on their side are dropped.
    pub fn into_store(self) -> SelectionStore {
        let basis: BasisMap = self
            .basis
            .unwrap_or_default()
            .into_iter()
            .map(|entry| {
                let identity = IdentityKey::new(entry.id, entry.sub_name);
                (identity.on(entry.side), entry.basis)
            })
            .filter(|(key, _)| {
                let items = match key.side {
                    Side::Offering => &self.offering,
                    Side::Requesting => &self.requesting,
                };
                count_of(items, &key.identity) > 0
            })
            .collect();

        SelectionStore::from_sides(self.offering, self.requesting, basis)
    }
}

/// True iff either side of the snapshot has an instance.
pub fn has_restorable(snapshot: &Snapshot) -> bool {
    !snapshot.offering.is_empty() || !snapshot.requesting.is_empty()
}

/// Reads and writes the single named snapshot slot.
#[derive(Debug, Clone)]
pub struct PersistenceBridge {
    storage: Arc<dyn SlotStorage>,
    slot: String,
    persist_basis: bool,
}

impl PersistenceBridge {
    pub fn new(storage: Arc<dyn SlotStorage>, slot: impl Into<String>) -> Self {
        PersistenceBridge {
            storage,
            slot: slot.into(),
            persist_basis: false,
        }
    }

    /// Also persist clean/duped choices. Off by default: restored items
    /// otherwise come back valued clean.
    pub fn with_basis_persistence(mut self, enabled: bool) -> Self {
        self.persist_basis = enabled;
        self
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn snapshot_of(&self, store: &SelectionStore) -> Snapshot {
        let basis = self.persist_basis.then(|| {
            store
                .basis_map()
                .iter()
                .map(|(key, basis)| BasisEntry {
                    side: key.side,
                    id: key.identity.base_id,
                    sub_name: key.identity.variant.clone(),
                    basis: *basis,
                })
                .collect()
        });

        Snapshot {
            offering: store.side(Side::Offering).to_vec(),
            requesting: store.side(Side::Requesting).to_vec(),
            basis,
        }
    }

    /// Overwrite the slot with the store's contents.
    ///
    /// An empty store is not written so a transient empty state never
    /// clobbers a meaningful earlier snapshot. Returns whether a write happened.
    pub async fn save(&self, store: &SelectionStore) -> Result<bool, StorageError> {
        if store.is_empty() {
            debug!(slot = %self.slot, "store empty, snapshot not written");
            return Ok(false);
        }

        let payload = serde_json::to_string(&self.snapshot_of(store))?;
        self.storage.set(&self.slot, &payload).await?;
        debug!(slot = %self.slot, bytes = payload.len(), "snapshot saved");
        Ok(true)
    }

    /// Read the slot. A payload that is not a valid snapshot is deleted and
    /// reported as absent.
    pub async fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        let Some(payload) = self.storage.get(&self.slot).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Snapshot>(&payload) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                warn!(slot = %self.slot, error = %err, "corrupted snapshot discarded");
                self.storage.remove(&self.slot).await?;
                Ok(None)
            }
        }
    }

    /// Delete the slot.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(&self.slot).await?;
        info!(slot = %self.slot, "snapshot cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawValue;
    use crate::persistence::MemorySlotStorage;

    const SLOT: &str = "tradeCalculatorItems";

    fn inst(id: i64, sub_name: Option<&str>) -> ItemInstance {
        ItemInstance {
            id: ItemId::new(id),
            name: format!("Item {}", id),
            item_type: "Vehicle".to_string(),
            cash_value: RawValue::text("1.5m"),
            duped_value: RawValue::Number(900_000.0),
            sub_name: sub_name.map(str::to_string),
            demand: Some("High".to_string()),
            trend: None,
            is_limited: Some(true),
            is_seasonal: None,
        }
    }

    fn bridge(storage: Arc<MemorySlotStorage>) -> PersistenceBridge {
        PersistenceBridge::new(storage, SLOT)
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let storage = Arc::new(MemorySlotStorage::new());
        let bridge = bridge(storage.clone());

        let mut store = SelectionStore::new();
        store.add_item(inst(1, None), Side::Offering);
        store.add_item(inst(2, Some("Red")), Side::Requesting);
        store.set_basis(&IdentityKey::base(ItemId::new(1)), Side::Offering, ValuationBasis::Duped);

        assert!(bridge.save(&store).await.unwrap());
        let snapshot = bridge.load().await.unwrap().expect("snapshot");
        assert!(has_restorable(&snapshot));
        assert_eq!(snapshot.offering, store.side(Side::Offering));
        assert!(snapshot.basis.is_none());

        // Basis choices are not carried over by default.
        let restored = snapshot.into_store();
        assert!(restored.basis_map().is_empty());
    }

    #[tokio::test]
    async fn test_payload_shape() {
        let storage = Arc::new(MemorySlotStorage::new());
        let bridge = bridge(storage.clone());
        let mut store = SelectionStore::new();
        store.add_item(inst(1, None), Side::Offering);
        bridge.save(&store).await.unwrap();

        let raw = storage.get(SLOT).await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["offering"][0]["id"], 1);
        assert_eq!(json["offering"][0]["type"], "Vehicle");
        assert_eq!(json["offering"][0]["cash_value"], "1.5m");
        assert_eq!(json["requesting"], serde_json::json!([]));
        assert!(json.get("basis").is_none());
    }

    #[tokio::test]
    async fn test_empty_store_does_not_clobber() {
        let storage = Arc::new(MemorySlotStorage::new());
        let bridge = bridge(storage.clone());
        let mut store = SelectionStore::new();
        store.add_item(inst(1, None), Side::Offering);
        bridge.save(&store).await.unwrap();

        store.clear_all();
        assert!(!bridge.save(&store).await.unwrap());
        assert!(bridge.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_corrupted_slot_is_deleted() {
        let storage = Arc::new(MemorySlotStorage::new().with_slot(SLOT, "{not json"));
        let bridge = bridge(storage.clone());

        assert_eq!(bridge.load().await.unwrap(), None);
        assert_eq!(storage.get(SLOT).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_wrong_shape_is_deleted() {
        let storage = Arc::new(MemorySlotStorage::new().with_slot(SLOT, r#"{"offering": 3}"#));
        let bridge = bridge(storage.clone());

        assert_eq!(bridge.load().await.unwrap(), None);
        assert_eq!(storage.get(SLOT).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_basis_persistence_enabled() {
        let storage = Arc::new(MemorySlotStorage::new());
        let bridge = bridge(storage).with_basis_persistence(true);

        let mut store = SelectionStore::new();
        store.add_item(inst(2, Some("Red")), Side::Requesting);
        let red = IdentityKey::with_variant(ItemId::new(2), "Red");
        store.set_basis(&red, Side::Requesting, ValuationBasis::Duped);
        // Pre-registered for an absent identity; not restored.
        store.set_basis(&IdentityKey::base(ItemId::new(8)), Side::Offering, ValuationBasis::Duped);

        bridge.save(&store).await.unwrap();
        let restored = bridge.load().await.unwrap().unwrap().into_store();
        assert_eq!(restored.basis_for(Side::Requesting, &red), ValuationBasis::Duped);
        assert_eq!(restored.basis_map().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_removes_slot() {
        let storage = Arc::new(MemorySlotStorage::new().with_slot(SLOT, "{}"));
        let bridge = bridge(storage.clone());
        bridge.clear().await.unwrap();
        assert_eq!(storage.get(SLOT).await.unwrap(), None);
    }
}

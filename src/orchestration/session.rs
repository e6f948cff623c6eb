//! A calculator session: the store, its snapshot slot and the restore gate.

use crate::domain::{
    Decimal, DemandTier, IdentityKey, Item, ItemInstance, Side, ValuationBasis,
};
use crate::engine::{
    find_similar, preferred_basis, Comparison, DragAssignment, GroupedEntry, SelectionStore,
    SimilarityQuery, SimilarityResult, Totals,
};
use crate::persistence::{has_restorable, PersistenceBridge, RestoreState, StorageError};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a saved trade is waiting to be restored or discarded")]
    RestorePending,
    #[error("no restore offer is pending")]
    NoRestoreOffer,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Owns the selection store for one logical user session.
///
/// Commands run to completion before returning; every successful mutation
/// is followed by a best-effort snapshot write.
#[derive(Debug)]
pub struct CalculatorSession {
    store: SelectionStore,
    bridge: PersistenceBridge,
    restore: RestoreState,
    drag: DragAssignment,
}

impl CalculatorSession {
    pub fn new(bridge: PersistenceBridge) -> Self {
        CalculatorSession {
            store: SelectionStore::new(),
            bridge,
            restore: RestoreState::Idle,
            drag: DragAssignment::new(),
        }
    }

    /// Run the mount-time check: offer the stored snapshot if it has anything in it.
    pub async fn mount(&mut self) -> Result<&RestoreState, SessionError> {
        if self.restore != RestoreState::Idle {
            return Ok(&self.restore);
        }
        self.restore = RestoreState::CheckingSnapshot;

        self.restore = match self.bridge.load().await {
            Ok(Some(snapshot)) if has_restorable(&snapshot) => {
                info!(
                    offering = snapshot.offering.len(),
                    requesting = snapshot.requesting.len(),
                    "saved trade available for restore"
                );
                RestoreState::Offered(snapshot)
            }
            Ok(_) => RestoreState::Empty,
            Err(err) => {
                // Persistence is advisory; start fresh rather than fail the session.
                warn!(error = %err, "snapshot check failed");
                RestoreState::Empty
            }
        };
        Ok(&self.restore)
    }

    /// Accept the offered snapshot and hydrate the store from it.
    pub fn confirm_restore(&mut self) -> Result<(), SessionError> {
        if self.restore.offered().is_none() {
            return Err(SessionError::NoRestoreOffer);
        }
        if let RestoreState::Offered(snapshot) =
            std::mem::replace(&mut self.restore, RestoreState::Restored)
        {
            self.store = snapshot.into_store();
        }
        info!("saved trade restored");
        Ok(())
    }

    /// Decline the offer and wipe the slot so it is not offered again.
    pub async fn decline_restore(&mut self) -> Result<(), SessionError> {
        if self.restore.offered().is_none() {
            return Err(SessionError::NoRestoreOffer);
        }
        self.bridge.clear().await?;
        self.store = SelectionStore::new();
        self.restore = RestoreState::ClearedAndFresh;
        info!("saved trade discarded");
        Ok(())
    }

    pub fn restore_state(&self) -> &RestoreState {
        &self.restore
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    fn ensure_mutable(&self) -> Result<(), SessionError> {
        if self.restore.accepts_mutations() {
            Ok(())
        } else {
            Err(SessionError::RestorePending)
        }
    }

    async fn persist(&self) {
        if let Err(err) = self.bridge.save(&self.store).await {
            warn!(error = %err, "snapshot write failed");
        }
    }

    pub async fn add_item(&mut self, instance: ItemInstance, side: Side) -> Result<(), SessionError> {
        self.ensure_mutable()?;
        self.store.add_item(instance, side);
        self.persist().await;
        Ok(())
    }

    pub async fn remove_one(
        &mut self,
        identity: &IdentityKey,
        side: Side,
    ) -> Result<bool, SessionError> {
        self.ensure_mutable()?;
        let removed = self.store.remove_one(identity, side);
        if removed {
            self.persist().await;
        }
        Ok(removed)
    }

    pub async fn remove_all(
        &mut self,
        identity: &IdentityKey,
        side: Side,
    ) -> Result<usize, SessionError> {
        self.ensure_mutable()?;
        let removed = self.store.remove_all(identity, side);
        if removed > 0 {
            self.persist().await;
        }
        Ok(removed)
    }

    pub async fn set_basis(
        &mut self,
        identity: &IdentityKey,
        side: Side,
        basis: ValuationBasis,
    ) -> Result<(), SessionError> {
        self.ensure_mutable()?;
        self.store.set_basis(identity, side, basis);
        self.persist().await;
        Ok(())
    }

    pub async fn toggle_basis(
        &mut self,
        identity: &IdentityKey,
        side: Side,
    ) -> Result<ValuationBasis, SessionError> {
        self.ensure_mutable()?;
        let basis = self.store.toggle_basis(identity, side);
        self.persist().await;
        Ok(basis)
    }

    pub async fn swap_sides(&mut self) -> Result<(), SessionError> {
        self.ensure_mutable()?;
        self.store.swap_sides();
        self.persist().await;
        Ok(())
    }

    pub async fn mirror(&mut self, from: Side) -> Result<(), SessionError> {
        self.ensure_mutable()?;
        self.store.mirror(from);
        self.persist().await;
        Ok(())
    }

    pub async fn clear_side(&mut self, side: Side) -> Result<(), SessionError> {
        self.ensure_mutable()?;
        self.store.clear_side(side);
        self.persist().await;
        Ok(())
    }

    /// Empty both sides. The stored snapshot is left alone, see [`Self::start_new`].
    pub async fn clear_all(&mut self) -> Result<(), SessionError> {
        self.ensure_mutable()?;
        self.store.clear_all();
        self.persist().await;
        Ok(())
    }

    /// Discard the trade entirely, stored snapshot included.
    pub async fn start_new(&mut self) -> Result<(), SessionError> {
        self.ensure_mutable()?;
        self.store.clear_all();
        self.drag.cancel();
        self.bridge.clear().await?;
        Ok(())
    }

    pub fn drag_start(&mut self, instance: ItemInstance) {
        self.drag.start(instance);
    }

    pub fn drag_active(&self) -> Option<&ItemInstance> {
        self.drag.active()
    }

    /// Complete a drag. Returns the side the item landed on, if any.
    pub async fn drag_end(&mut self, zone: Option<&str>) -> Result<Option<Side>, SessionError> {
        if let Err(err) = self.ensure_mutable() {
            self.drag.cancel();
            return Err(err);
        }
        let landed = self.drag.end(zone, &mut self.store);
        if landed.is_some() {
            self.persist().await;
        }
        Ok(landed)
    }

    pub fn grouped(&self, side: Side) -> Vec<GroupedEntry> {
        self.store.grouped(side)
    }

    pub fn totals(&self, side: Side) -> Totals {
        self.store.totals(side)
    }

    pub fn comparison(&self) -> Comparison {
        self.store.comparison()
    }

    /// Items worth about as much as `side`'s total, excluding anything
    /// already on either side.
    pub fn similar_to_side(
        &self,
        side: Side,
        catalog: &[Item],
        tolerance: Decimal,
        baseline_demand: Option<DemandTier>,
        limit: Option<usize>,
    ) -> Vec<SimilarityResult> {
        let instances = self.store.side(side);
        let basis = preferred_basis(instances, side, self.store.basis_map());
        let mut query =
            SimilarityQuery::new(tolerance, basis).with_baseline_demand(baseline_demand);
        query.limit = limit;

        let exclude: Vec<ItemInstance> = self
            .store
            .side(Side::Offering)
            .iter()
            .chain(self.store.side(Side::Requesting))
            .cloned()
            .collect();

        find_similar(self.totals(side).total, catalog, &exclude, &query)
    }
}

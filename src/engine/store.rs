//! The two trade sides and their valuation-basis choices.

use super::aggregator::{compute_totals, Comparison, Totals};
use super::grouping::{group_items, GroupedEntry};
use super::BasisMap;
use crate::domain::{IdentityKey, ItemInstance, Side, ValuationBasis};
use tracing::debug;

/// Single source of truth for an in-progress trade.
///
/// Every mutation goes through `&mut self`, so a caller never observes a
/// half-applied operation. Invariant: a basis entry is pruned as soon as the
/// last instance of its identity leaves that side (explicit `set_basis`
/// pre-registration excepted).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionStore {
    offering: Vec<ItemInstance>,
    requesting: Vec<ItemInstance>,
    basis: BasisMap,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from persisted collections.
    pub fn from_sides(
        offering: Vec<ItemInstance>,
        requesting: Vec<ItemInstance>,
        basis: BasisMap,
    ) -> Self {
        SelectionStore {
            offering,
            requesting,
            basis,
        }
    }

    pub fn side(&self, side: Side) -> &[ItemInstance] {
        match side {
            Side::Offering => &self.offering,
            Side::Requesting => &self.requesting,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Vec<ItemInstance> {
        match side {
            Side::Offering => &mut self.offering,
            Side::Requesting => &mut self.requesting,
        }
    }

    pub fn basis_map(&self) -> &BasisMap {
        &self.basis
    }

    pub fn basis_for(&self, side: Side, identity: &IdentityKey) -> ValuationBasis {
        self.basis.get(side, identity)
    }

    pub fn is_empty(&self) -> bool {
        self.offering.is_empty() && self.requesting.is_empty()
    }

    /// Append an instance. No capacity limit is enforced here.
    pub fn add_item(&mut self, instance: ItemInstance, side: Side) {
        debug!(%side, identity = %instance.identity(), "add item");
        self.side_mut(side).push(instance);
    }

    /// Remove the first instance matching `identity`. Returns whether one was removed.
    pub fn remove_one(&mut self, identity: &IdentityKey, side: Side) -> bool {
        if !identity.is_valid() {
            return false;
        }

        let items = self.side_mut(side);
        let Some(pos) = items.iter().position(|i| matches(i, identity)) else {
            return false;
        };
        items.remove(pos);

        if !items.iter().any(|i| matches(i, identity)) {
            self.basis.remove(&identity.clone().on(side));
        }
        true
    }

    /// Remove every instance matching `identity`. Returns how many were removed.
    pub fn remove_all(&mut self, identity: &IdentityKey, side: Side) -> usize {
        if !identity.is_valid() {
            return 0;
        }

        let items = self.side_mut(side);
        let before = items.len();
        items.retain(|i| !matches(i, identity));
        let removed = before - items.len();

        self.basis.remove(&identity.clone().on(side));
        removed
    }

    /// Upsert the basis for an identity. The identity need not be present yet.
    pub fn set_basis(&mut self, identity: &IdentityKey, side: Side, basis: ValuationBasis) {
        if !identity.is_valid() {
            return;
        }
        self.basis.set(identity.clone().on(side), basis);
    }

    /// Flip clean/duped for an identity and return the basis now in effect.
    /// An invalid identity is left untouched.
    pub fn toggle_basis(&mut self, identity: &IdentityKey, side: Side) -> ValuationBasis {
        let current = self.basis_for(side, identity);
        if !identity.is_valid() {
            return current;
        }
        let next = current.toggled();
        self.set_basis(identity, side, next);
        next
    }

    /// Exchange the sides; basis choices travel with their items.
    pub fn swap_sides(&mut self) {
        std::mem::swap(&mut self.offering, &mut self.requesting);
        self.basis.swap_sides();
    }

    /// Make the opposite side a copy of `from`, basis choices included.
    pub fn mirror(&mut self, from: Side) {
        let copy = self.side(from).to_vec();
        *self.side_mut(from.opposite()) = copy;
        self.basis.mirror(from);
    }

    pub fn clear_side(&mut self, side: Side) {
        self.side_mut(side).clear();
        self.basis.remove_side(side);
    }

    pub fn clear_all(&mut self) {
        self.offering.clear();
        self.requesting.clear();
        self.basis.clear();
    }

    pub fn grouped(&self, side: Side) -> Vec<GroupedEntry> {
        group_items(self.side(side))
    }

    pub fn totals(&self, side: Side) -> Totals {
        compute_totals(self.side(side), side, &self.basis)
    }

    pub fn comparison(&self) -> Comparison {
        Comparison::new(self.totals(Side::Offering), self.totals(Side::Requesting))
    }

    /// Consume the store, keeping its parts.
    pub fn into_parts(self) -> (Vec<ItemInstance>, Vec<ItemInstance>, BasisMap) {
        (self.offering, self.requesting, self.basis)
    }
}

fn matches(instance: &ItemInstance, identity: &IdentityKey) -> bool {
    instance.id == identity.base_id && instance.sub_name == identity.variant
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Decimal, ItemId, RawValue};

    fn inst(id: i64, sub_name: Option<&str>, cash: &str) -> ItemInstance {
        ItemInstance {
            id: ItemId::new(id),
            name: format!("Item {}", id),
            item_type: "Vehicle".to_string(),
            cash_value: RawValue::text(cash),
            duped_value: RawValue::text("1k"),
            sub_name: sub_name.map(str::to_string),
            demand: None,
            trend: None,
            is_limited: None,
            is_seasonal: None,
        }
    }

    fn base(id: i64) -> IdentityKey {
        IdentityKey::base(ItemId::new(id))
    }

    #[test]
    fn test_remove_one_keeps_basis_while_stack_remains() {
        let mut store = SelectionStore::new();
        store.add_item(inst(1, None, "1m"), Side::Offering);
        store.add_item(inst(1, None, "1m"), Side::Offering);
        store.set_basis(&base(1), Side::Offering, ValuationBasis::Duped);

        assert!(store.remove_one(&base(1), Side::Offering));
        assert_eq!(store.side(Side::Offering).len(), 1);
        assert_eq!(store.basis_for(Side::Offering, &base(1)), ValuationBasis::Duped);

        assert!(store.remove_one(&base(1), Side::Offering));
        assert!(store.basis_map().is_empty());
    }

    #[test]
    fn test_remove_one_takes_first_match_only() {
        let mut store = SelectionStore::new();
        store.add_item(inst(1, Some("Red"), "1m"), Side::Requesting);
        store.add_item(inst(2, None, "1m"), Side::Requesting);
        store.add_item(inst(1, Some("Red"), "1m"), Side::Requesting);

        let red = IdentityKey::with_variant(ItemId::new(1), "Red");
        store.remove_one(&red, Side::Requesting);

        let ids: Vec<String> = store
            .side(Side::Requesting)
            .iter()
            .map(|i| i.identity().to_string())
            .collect();
        assert_eq!(ids, vec!["2-base", "1-Red"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = SelectionStore::new();
        store.add_item(inst(1, None, "1m"), Side::Offering);
        assert!(!store.remove_one(&base(2), Side::Offering));
        assert!(!store.remove_one(&base(1), Side::Requesting));
        assert_eq!(store.remove_all(&base(3), Side::Offering), 0);
        assert_eq!(store.side(Side::Offering).len(), 1);
    }

    #[test]
    fn test_invalid_identity_is_noop() {
        let mut store = SelectionStore::new();
        store.add_item(inst(1, None, "1m"), Side::Offering);
        store.set_basis(&base(-1), Side::Offering, ValuationBasis::Duped);
        assert!(store.basis_map().is_empty());
        assert!(!store.remove_one(&base(-1), Side::Offering));
    }

    #[test]
    fn test_remove_all_prunes_basis() {
        let mut store = SelectionStore::new();
        store.add_item(inst(5, None, "1m"), Side::Offering);
        store.add_item(inst(5, None, "1m"), Side::Offering);
        store.set_basis(&base(5), Side::Offering, ValuationBasis::Duped);
        store.set_basis(&base(5), Side::Requesting, ValuationBasis::Duped);

        assert_eq!(store.remove_all(&base(5), Side::Offering), 2);
        assert!(!store
            .basis_map()
            .iter()
            .any(|(key, _)| key.side == Side::Offering && key.identity == base(5)));
        assert_eq!(store.basis_map().len(), 1);
    }

    #[test]
    fn test_variant_and_base_are_separate_stacks() {
        let mut store = SelectionStore::new();
        store.add_item(inst(1, None, "1m"), Side::Offering);
        store.add_item(inst(1, Some("Red"), "2m"), Side::Offering);
        store.remove_all(&base(1), Side::Offering);
        assert_eq!(store.side(Side::Offering).len(), 1);
        assert_eq!(store.side(Side::Offering)[0].sub_name.as_deref(), Some("Red"));
    }

    #[test]
    fn test_swap_twice_is_identity() {
        let mut store = SelectionStore::new();
        store.add_item(inst(1, None, "1m"), Side::Offering);
        store.add_item(inst(2, Some("Gold"), "3m"), Side::Requesting);
        store.set_basis(&base(1), Side::Offering, ValuationBasis::Duped);
        let original = store.clone();

        store.swap_sides();
        assert_eq!(store.side(Side::Requesting)[0].id, ItemId::new(1));
        assert_eq!(store.basis_for(Side::Requesting, &base(1)), ValuationBasis::Duped);
        assert_eq!(store.basis_for(Side::Offering, &base(1)), ValuationBasis::Clean);

        store.swap_sides();
        assert_eq!(store, original);
    }

    #[test]
    fn test_mirror_is_not_additive() {
        let mut store = SelectionStore::new();
        store.add_item(inst(1, None, "1m"), Side::Offering);
        store.add_item(inst(1, None, "1m"), Side::Offering);
        store.add_item(inst(9, None, "7m"), Side::Requesting);
        store.set_basis(&base(9), Side::Requesting, ValuationBasis::Duped);
        store.set_basis(&base(1), Side::Offering, ValuationBasis::Duped);

        store.mirror(Side::Offering);
        let once = store.clone();
        store.mirror(Side::Offering);

        assert_eq!(store, once);
        assert_eq!(store.side(Side::Requesting), store.side(Side::Offering));
        assert_eq!(store.basis_for(Side::Requesting, &base(1)), ValuationBasis::Duped);
        assert_eq!(store.basis_for(Side::Requesting, &base(9)), ValuationBasis::Clean);
    }

    #[test]
    fn test_clear_side_and_all() {
        let mut store = SelectionStore::new();
        store.add_item(inst(1, None, "1m"), Side::Offering);
        store.add_item(inst(2, None, "1m"), Side::Requesting);
        store.set_basis(&base(1), Side::Offering, ValuationBasis::Duped);
        store.set_basis(&base(2), Side::Requesting, ValuationBasis::Duped);

        store.clear_side(Side::Offering);
        assert!(store.side(Side::Offering).is_empty());
        assert_eq!(store.side(Side::Requesting).len(), 1);
        assert_eq!(store.basis_map().len(), 1);

        store.clear_all();
        assert!(store.is_empty());
        assert!(store.basis_map().is_empty());
    }

    #[test]
    fn test_toggle_basis_changes_totals() {
        let mut store = SelectionStore::new();
        store.add_item(inst(1, None, "1m"), Side::Offering);
        assert_eq!(store.toggle_basis(&base(1), Side::Offering), ValuationBasis::Duped);
        assert_eq!(store.totals(Side::Offering).total, Decimal::from_i64(1_000));
        assert_eq!(store.toggle_basis(&base(1), Side::Offering), ValuationBasis::Clean);
        assert_eq!(store.totals(Side::Offering).total, Decimal::from_i64(1_000_000));
    }

    #[test]
    fn test_toggle_invalid_identity_reports_unchanged_basis() {
        let mut store = SelectionStore::new();
        let invalid = IdentityKey::base(ItemId::new(-1));
        assert_eq!(store.toggle_basis(&invalid, Side::Offering), ValuationBasis::Clean);
        assert_eq!(store.basis_for(Side::Offering, &invalid), ValuationBasis::Clean);
        assert!(store.basis_map().is_empty());
    }
}

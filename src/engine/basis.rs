//! Per-side valuation basis choices.

use crate::domain::{IdentityKey, Side, SideKey, ValuationBasis};
use std::collections::BTreeMap;

/// Valuation basis chosen for each (side, identity). Absent means clean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasisMap {
    entries: BTreeMap<SideKey, ValuationBasis>,
}

impl BasisMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective basis for an identity on a side.
    pub fn get(&self, side: Side, identity: &IdentityKey) -> ValuationBasis {
        self.entries
            .get(&identity.clone().on(side))
            .copied()
            .unwrap_or_default()
    }

    pub fn set(&mut self, key: SideKey, basis: ValuationBasis) {
        self.entries.insert(key, basis);
    }

    pub fn remove(&mut self, key: &SideKey) -> Option<ValuationBasis> {
        self.entries.remove(key)
    }

    /// Drop every entry namespaced to `side`.
    pub fn remove_side(&mut self, side: Side) {
        self.entries.retain(|key, _| key.side != side);
    }

    /// Move every entry to the other side.
    pub fn swap_sides(&mut self) {
        let entries = std::mem::take(&mut self.entries);
        self.entries = entries
            .into_iter()
            .map(|(key, basis)| (key.moved_to(key.side.opposite()), basis))
            .collect();
    }

    /// Replace the opposite side's entries with copies of `from`'s entries.
    pub fn mirror(&mut self, from: Side) {
        let to = from.opposite();
        self.remove_side(to);
        let copied: Vec<(SideKey, ValuationBasis)> = self
            .entries
            .iter()
            .filter(|(key, _)| key.side == from)
            .map(|(key, basis)| (key.moved_to(to), *basis))
            .collect();
        self.entries.extend(copied);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, key: &SideKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SideKey, &ValuationBasis)> {
        self.entries.iter()
    }
}

impl FromIterator<(SideKey, ValuationBasis)> for BasisMap {
    fn from_iter<I: IntoIterator<Item = (SideKey, ValuationBasis)>>(iter: I) -> Self {
        BasisMap {
            entries: iter.into_iter().collect(),
        }
    }
}

//! Suggest catalog items worth about as much as a given total.

use super::aggregator::value_of;
use super::BasisMap;
use crate::domain::{
    DemandTier, Decimal, IdentityKey, Item, ItemInstance, Side, TrendTier, ValuationBasis,
};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Parameters of a similarity search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityQuery {
    /// Maximum absolute distance from the target.
    pub tolerance: Decimal,
    /// Value field candidates are judged by.
    pub basis: ValuationBasis,
    /// Demand tier results are ranked towards after value proximity.
    pub baseline_demand: Option<DemandTier>,
    pub limit: Option<usize>,
    pub include_untradable: bool,
}

impl SimilarityQuery {
    pub fn new(tolerance: Decimal, basis: ValuationBasis) -> Self {
        SimilarityQuery {
            tolerance,
            basis,
            baseline_demand: None,
            limit: None,
            include_untradable: false,
        }
    }

    pub fn with_baseline_demand(mut self, demand: Option<DemandTier>) -> Self {
        self.baseline_demand = demand;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityResult {
    /// Candidate as it would be placed on a side (variant already applied).
    pub candidate: ItemInstance,
    pub value: Decimal,
    /// `value − target`.
    pub delta: Decimal,
    pub demand: Option<DemandTier>,
    pub trend: Option<TrendTier>,
}

/// Basis to compare a side against: duped only when every instance on it is
/// duped, clean otherwise.
pub fn preferred_basis(instances: &[ItemInstance], side: Side, basis: &BasisMap) -> ValuationBasis {
    let all_duped = !instances.is_empty()
        && instances
            .iter()
            .all(|i| basis.get(side, &i.identity()) == ValuationBasis::Duped);

    if all_duped {
        ValuationBasis::Duped
    } else {
        ValuationBasis::Clean
    }
}

/// Catalog entries (and each variant on its own) within `query.tolerance` of
/// `target`, skipping identities already in `exclude`.
///
/// Ordered by absolute delta, then demand distance from the baseline
/// (unknown demand last), then name and identity.
pub fn find_similar(
    target: Decimal,
    catalog: &[Item],
    exclude: &[ItemInstance],
    query: &SimilarityQuery,
) -> Vec<SimilarityResult> {
    let excluded: HashSet<IdentityKey> = exclude.iter().map(ItemInstance::identity).collect();

    let mut results: Vec<SimilarityResult> = catalog
        .iter()
        .filter(|item| query.include_untradable || item.tradable)
        .flat_map(|item| item.expansions())
        .filter(|candidate| !excluded.contains(&candidate.identity()))
        .filter_map(|candidate| {
            let value = value_of(&candidate, query.basis);
            // Out of range means no closer than the tolerance can express.
            let delta = value.checked_sub(target)?;
            if delta.abs() > query.tolerance {
                return None;
            }
            Some(SimilarityResult {
                demand: candidate.demand_tier(),
                trend: candidate.trend_tier(),
                candidate,
                value,
                delta,
            })
        })
        .collect();

    results.sort_by(|a, b| compare_results(a, b, query.baseline_demand));

    if let Some(limit) = query.limit {
        results.truncate(limit);
    }
    results
}

fn compare_results(
    a: &SimilarityResult,
    b: &SimilarityResult,
    baseline: Option<DemandTier>,
) -> Ordering {
    a.delta
        .abs()
        .cmp(&b.delta.abs())
        .then_with(|| demand_rank(a.demand, baseline).cmp(&demand_rank(b.demand, baseline)))
        .then_with(|| a.candidate.name.cmp(&b.candidate.name))
        .then_with(|| a.candidate.identity().cmp(&b.candidate.identity()))
}

// Unknown demand sorts after every known tier.
fn demand_rank(demand: Option<DemandTier>, baseline: Option<DemandTier>) -> u8 {
    match (demand, baseline) {
        (Some(tier), Some(baseline)) => tier.distance(baseline),
        (Some(_), None) => 0,
        (None, _) => u8::MAX,
    }
}

//! Totals and side-by-side comparison.

use super::BasisMap;
use crate::domain::{parse_value_or_zero, Decimal, ItemInstance, Side, ValuationBasis};
use serde::Serialize;
use tracing::warn;

/// Count and sum of the instances valued under one basis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketTotal {
    pub count: usize,
    pub sum: Decimal,
}

impl BucketTotal {
    fn add(&mut self, value: Decimal) {
        self.count += 1;
        accumulate(&mut self.sum, value);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub clean: BucketTotal,
    pub duped: BucketTotal,
}

/// Total value of one side, split by basis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total: Decimal,
    pub breakdown: Breakdown,
}

impl Totals {
    pub fn instance_count(&self) -> usize {
        self.breakdown.clean.count + self.breakdown.duped.count
    }
}

/// Both sides' totals and their difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub offering: Totals,
    pub requesting: Totals,
    /// `offering − requesting`; negative means the offer is worth less.
    pub difference: Decimal,
}

impl Comparison {
    pub fn new(offering: Totals, requesting: Totals) -> Self {
        Comparison {
            offering,
            requesting,
            difference: offering.total.saturating_sub(requesting.total),
        }
    }
}

/// Value of a single instance under `basis`. Unparseable values count as 0.
pub fn value_of(instance: &ItemInstance, basis: ValuationBasis) -> Decimal {
    parse_value_or_zero(instance.raw_value(basis))
}

/// Total a side's instances, each under its own effective basis.
///
/// Derived purely from the arguments; nothing is cached.
pub fn compute_totals(instances: &[ItemInstance], side: Side, basis: &BasisMap) -> Totals {
    let mut totals = Totals::default();

    for instance in instances {
        let effective = basis.get(side, &instance.identity());
        let value = value_of(instance, effective);
        match effective {
            ValuationBasis::Clean => totals.breakdown.clean.add(value),
            ValuationBasis::Duped => totals.breakdown.duped.add(value),
        }
        accumulate(&mut totals.total, value);
    }

    totals
}

/// Add into a running sum, clamping at the representable range.
fn accumulate(sum: &mut Decimal, value: Decimal) {
    *sum = match sum.checked_add(value) {
        Some(next) => next,
        None => {
            warn!(%value, "total out of range, clamping");
            sum.saturating_add(value)
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IdentityKey, ItemId, RawValue};

    fn inst(id: i64, cash: &str, duped: &str) -> ItemInstance {
        ItemInstance {
            id: ItemId::new(id),
            name: format!("Item {}", id),
            item_type: "Rim".to_string(),
            cash_value: RawValue::text(cash),
            duped_value: RawValue::text(duped),
            sub_name: None,
            demand: None,
            trend: None,
            is_limited: None,
            is_seasonal: None,
        }
    }

    fn d(n: i64) -> Decimal {
        Decimal::from_i64(n)
    }

    #[test]
    fn test_all_clean_by_default() {
        let list = vec![inst(1, "1m", "400k"), inst(2, "250k", "N/A")];
        let totals = compute_totals(&list, Side::Offering, &BasisMap::new());
        assert_eq!(totals.total, d(1_250_000));
        assert_eq!(totals.breakdown.clean.count, 2);
        assert_eq!(totals.breakdown.duped.count, 0);
    }

    #[test]
    fn test_mixed_basis_buckets() {
        let list = vec![inst(1, "1m", "400k"), inst(1, "1m", "400k"), inst(2, "250k", "100k")];
        let mut basis = BasisMap::new();
        basis.set(
            IdentityKey::base(ItemId::new(1)).on(Side::Requesting),
            ValuationBasis::Duped,
        );

        let totals = compute_totals(&list, Side::Requesting, &basis);
        assert_eq!(totals.breakdown.duped.count, 2);
        assert_eq!(totals.breakdown.duped.sum, d(800_000));
        assert_eq!(totals.breakdown.clean.sum, d(250_000));
        assert_eq!(totals.total, d(1_050_000));
        assert_eq!(totals.instance_count(), list.len());

        // Same map read for the other side has no effect.
        let other = compute_totals(&list, Side::Offering, &basis);
        assert_eq!(other.total, d(2_250_000));
    }

    #[test]
    fn test_unparseable_counts_as_zero() {
        let list = vec![inst(1, "???", "1"), inst(2, "5k", "1")];
        let totals = compute_totals(&list, Side::Offering, &BasisMap::new());
        assert_eq!(totals.total, d(5_000));
        assert_eq!(totals.breakdown.clean.count, 2);
    }

    #[test]
    fn test_comparison_sign() {
        let offering = compute_totals(&[inst(1, "2m", "0")], Side::Offering, &BasisMap::new());
        let requesting = compute_totals(
            &[inst(2, "1.5m", "0"), inst(2, "1.5m", "0")],
            Side::Requesting,
            &BasisMap::new(),
        );
        let cmp = Comparison::new(offering, requesting);
        assert_eq!(cmp.difference, d(-1_000_000));
        assert!(cmp.difference.is_negative());
    }

    #[test]
    fn test_out_of_range_totals_clamp() {
        let huge = "79228162514264337593543950335";
        let list = vec![inst(1, huge, "0"), inst(2, huge, "0"), inst(3, "1m", "0")];
        let totals = compute_totals(&list, Side::Offering, &BasisMap::new());
        assert_eq!(totals.total, Decimal::max_value());
        assert_eq!(totals.breakdown.clean.sum, Decimal::max_value());
        assert_eq!(totals.instance_count(), 3);

        let negative = compute_totals(
            &[inst(4, &format!("-{}", huge), "0")],
            Side::Requesting,
            &BasisMap::new(),
        );
        let cmp = Comparison::new(totals, negative);
        assert_eq!(cmp.difference, Decimal::max_value());
    }
}

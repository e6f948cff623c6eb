//! Catalog items and the instances placed on a trade side.

use crate::domain::{DemandTier, IdentityKey, ItemId, RawValue, TrendTier, ValuationBasis};
use serde::{Deserialize, Serialize};

/// A named sub-version of a catalog item with its own value fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: i64,
    pub sub_name: String,
    #[serde(default)]
    pub cash_value: RawValue,
    #[serde(default)]
    pub duped_value: RawValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
}

/// Read-only catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default, alias = "children")]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub cash_value: RawValue,
    #[serde(default)]
    pub duped_value: RawValue,
    #[serde(default)]
    pub demand: Option<String>,
    #[serde(default)]
    pub trend: Option<String>,
    #[serde(default)]
    pub is_limited: bool,
    #[serde(default)]
    pub is_seasonal: bool,
    #[serde(default = "default_tradable")]
    pub tradable: bool,
}

fn default_tradable() -> bool {
    true
}

impl Item {
    pub fn variant(&self, sub_name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.sub_name == sub_name)
    }

    /// Build the instance a user places on a side.
    ///
    /// With `sub_name` set, the variant's value fields replace the base ones and
    /// its demand/trend win when present. Returns `None` for an unknown variant.
    pub fn instance(&self, sub_name: Option<&str>) -> Option<ItemInstance> {
        let base = ItemInstance {
            id: self.id,
            name: self.name.clone(),
            item_type: self.item_type.clone(),
            cash_value: self.cash_value.clone(),
            duped_value: self.duped_value.clone(),
            sub_name: None,
            demand: self.demand.clone(),
            trend: self.trend.clone(),
            is_limited: Some(self.is_limited),
            is_seasonal: Some(self.is_seasonal),
        };

        match sub_name {
            None => Some(base),
            Some(name) => {
                let variant = self.variant(name)?;
                Some(ItemInstance {
                    cash_value: variant.cash_value.clone(),
                    duped_value: variant.duped_value.clone(),
                    sub_name: Some(variant.sub_name.clone()),
                    demand: variant.demand.clone().or(base.demand.clone()),
                    trend: variant.trend.clone().or(base.trend.clone()),
                    ..base
                })
            }
        }
    }

    /// The base instance followed by one instance per variant.
    pub fn expansions(&self) -> impl Iterator<Item = ItemInstance> + '_ {
        std::iter::once(None)
            .chain(self.variants.iter().map(|v| Some(v.sub_name.as_str())))
            .filter_map(move |sub_name| self.instance(sub_name))
    }
}

/// An item placed on a side. Multiplicity is by repetition.
///
/// Field names are part of the persisted snapshot format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub cash_value: RawValue,
    #[serde(default)]
    pub duped_value: RawValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_limited: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_seasonal: Option<bool>,
}

impl ItemInstance {
    pub fn identity(&self) -> IdentityKey {
        IdentityKey::of(self)
    }

    pub fn raw_value(&self, basis: ValuationBasis) -> &RawValue {
        match basis {
            ValuationBasis::Clean => &self.cash_value,
            ValuationBasis::Duped => &self.duped_value,
        }
    }

    pub fn demand_tier(&self) -> Option<DemandTier> {
        self.demand.as_deref().and_then(DemandTier::parse)
    }

    pub fn trend_tier(&self) -> Option<TrendTier> {
        self.trend.as_deref().and_then(TrendTier::parse)
    }

    /// Display name including the variant, e.g. `"Torpedo (Red)"`.
    pub fn display_name(&self) -> String {
        match &self.sub_name {
            Some(sub) => format!("{} ({})", self.name, sub),
            None => self.name.clone(),
        }
    }
}

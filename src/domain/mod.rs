//! Domain types for the trade value calculator.
//!
//! This module provides:
//! - Lossless numeric handling via the Decimal wrapper
//! - Value parsing (`"1.2m"`, `"450k"`, `"N/A"`) and display formatting
//! - Domain primitives: ItemId, Side, ValuationBasis
//! - Catalog items, item instances and their stack identity
//! - Demand and trend tiers

pub mod decimal;
pub mod identity;
pub mod item;
pub mod primitives;
pub mod tiers;
pub mod value;

pub use decimal::Decimal;
pub use identity::{IdentityKey, SideKey};
pub use item::{Item, ItemInstance, Variant};
pub use primitives::{ItemId, Side, SideParseError, ValuationBasis};
pub use tiers::{DemandTier, TrendTier};
pub use value::{
    format_value, parse_value, parse_value_or_zero, parse_value_str, RawValue, ValueParseError,
};

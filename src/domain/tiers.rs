//! Ordinal market tiers: demand and trend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Demand tier on a fixed ordinal scale, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DemandTier {
    CloseToNone,
    VeryLow,
    Low,
    Medium,
    Decent,
    High,
    VeryHigh,
    ExtremelyHigh,
}

impl DemandTier {
    pub const ALL: [DemandTier; 8] = [
        DemandTier::CloseToNone,
        DemandTier::VeryLow,
        DemandTier::Low,
        DemandTier::Medium,
        DemandTier::Decent,
        DemandTier::High,
        DemandTier::VeryHigh,
        DemandTier::ExtremelyHigh,
    ];

    /// Parse the catalog's label. `"N/A"` and unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<DemandTier> {
        let wanted = normalize(label);
        Self::ALL
            .into_iter()
            .find(|tier| normalize(tier.label()) == wanted)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DemandTier::CloseToNone => "Close to none",
            DemandTier::VeryLow => "Very Low",
            DemandTier::Low => "Low",
            DemandTier::Medium => "Medium",
            DemandTier::Decent => "Decent",
            DemandTier::High => "High",
            DemandTier::VeryHigh => "Very High",
            DemandTier::ExtremelyHigh => "Extremely High",
        }
    }

    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn distance(&self, other: DemandTier) -> u8 {
        self.rank().abs_diff(other.rank())
    }
}

impl fmt::Display for DemandTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Value trajectory tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrendTier {
    Avoided,
    Dropping,
    Unstable,
    Hoarded,
    Projected,
    Stable,
    Recovering,
    Rising,
    Hyped,
}

impl TrendTier {
    pub const ALL: [TrendTier; 9] = [
        TrendTier::Avoided,
        TrendTier::Dropping,
        TrendTier::Unstable,
        TrendTier::Hoarded,
        TrendTier::Projected,
        TrendTier::Stable,
        TrendTier::Recovering,
        TrendTier::Rising,
        TrendTier::Hyped,
    ];

    pub fn parse(label: &str) -> Option<TrendTier> {
        let wanted = normalize(label);
        Self::ALL
            .into_iter()
            .find(|tier| normalize(tier.label()) == wanted)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendTier::Avoided => "Avoided",
            TrendTier::Dropping => "Dropping",
            TrendTier::Unstable => "Unstable",
            TrendTier::Hoarded => "Hoarded",
            TrendTier::Projected => "Projected",
            TrendTier::Stable => "Stable",
            TrendTier::Recovering => "Recovering",
            TrendTier::Rising => "Rising",
            TrendTier::Hyped => "Hyped",
        }
    }
}

impl fmt::Display for TrendTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Labels differ in case and spacing between catalog revisions.
fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

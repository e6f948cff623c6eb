//! Domain primitives: ItemId, Side, ValuationBasis.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog identifier of a base item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl ItemId {
    pub fn new(id: i64) -> Self {
        ItemId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// The catalog never hands out negative ids; anything else is structurally invalid.
    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two symmetric roles in a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Items the user gives away.
    Offering,
    /// Items the user asks for.
    Requesting,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Offering => Side::Requesting,
            Side::Requesting => Side::Offering,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Offering => "offering",
            Side::Requesting => "requesting",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown side: {0}")]
pub struct SideParseError(pub String);

impl FromStr for Side {
    type Err = SideParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offering" => Ok(Side::Offering),
            "requesting" => Ok(Side::Requesting),
            other => Err(SideParseError(other.to_string())),
        }
    }
}

/// Which value field an instance is counted with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuationBasis {
    /// Legitimate provenance; uses `cash_value`.
    #[default]
    Clean,
    /// Duplicated provenance; uses `duped_value`.
    Duped,
}

impl ValuationBasis {
    pub fn toggled(&self) -> ValuationBasis {
        match self {
            ValuationBasis::Clean => ValuationBasis::Duped,
            ValuationBasis::Duped => ValuationBasis::Clean,
        }
    }
}

impl fmt::Display for ValuationBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValuationBasis::Clean => write!(f, "clean"),
            ValuationBasis::Duped => write!(f, "duped"),
        }
    }
}

//! Stack identity of item instances.

use crate::domain::{ItemId, ItemInstance, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a stack: base item plus optional variant name.
///
/// Renders as `{id}-{variant}` or `{id}-base`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IdentityKey {
    pub base_id: ItemId,
    pub variant: Option<String>,
}

impl IdentityKey {
    pub fn new(base_id: ItemId, variant: Option<String>) -> Self {
        IdentityKey { base_id, variant }
    }

    /// Identity of a placed instance.
    pub fn of(instance: &ItemInstance) -> Self {
        IdentityKey::new(instance.id, instance.sub_name.clone())
    }

    pub fn base(base_id: ItemId) -> Self {
        IdentityKey {
            base_id,
            variant: None,
        }
    }

    pub fn with_variant(base_id: ItemId, variant: impl Into<String>) -> Self {
        IdentityKey {
            base_id,
            variant: Some(variant.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.base_id.is_valid()
    }

    pub fn on(self, side: Side) -> SideKey {
        SideKey {
            side,
            identity: self,
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant {
            Some(variant) => write!(f, "{}-{}", self.base_id, variant),
            None => write!(f, "{}-base", self.base_id),
        }
    }
}

/// Identity namespaced by side; the key of the valuation-basis map.
///
/// Renders as `{side}-{id}-{variant|base}`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SideKey {
    pub side: Side,
    pub identity: IdentityKey,
}

impl SideKey {
    pub fn new(side: Side, identity: IdentityKey) -> Self {
        SideKey { side, identity }
    }

    /// The same identity on another side.
    pub fn moved_to(&self, side: Side) -> SideKey {
        SideKey {
            side,
            identity: self.identity.clone(),
        }
    }
}

impl fmt::Display for SideKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.side, self.identity)
    }
}

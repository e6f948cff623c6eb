//! Drag-and-drop completion as an "add to side" command.

use super::SelectionStore;
use crate::domain::{ItemInstance, Side};
use tracing::debug;

/// Resolve a drop zone id to a side.
///
/// Accepts `"offering"`/`"requesting"` optionally followed by `-zone` or
/// `-drop-zone`, case-insensitive.
pub fn resolve_drop_zone(zone: &str) -> Option<Side> {
    let zone = zone.trim().to_ascii_lowercase();
    let side = zone
        .strip_suffix("-drop-zone")
        .or_else(|| zone.strip_suffix("-zone"))
        .unwrap_or(zone.as_str());
    side.parse().ok()
}

/// Tracks the instance being dragged during a single gesture.
#[derive(Debug, Clone, Default)]
pub struct DragAssignment {
    active: Option<ItemInstance>,
}

impl DragAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ItemInstance> {
        self.active.as_ref()
    }

    /// Begin a gesture; a previous unfinished gesture is abandoned.
    pub fn start(&mut self, instance: ItemInstance) {
        self.active = Some(instance);
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Finish the gesture. Adds the dragged instance to the side named by
    /// `zone` and returns it; no gesture, no zone or an unknown zone is a no-op.
    pub fn end(&mut self, zone: Option<&str>, store: &mut SelectionStore) -> Option<Side> {
        let instance = self.active.take()?;
        let Some(side) = zone.and_then(resolve_drop_zone) else {
            debug!(identity = %instance.identity(), "drag ended outside a drop zone");
            return None;
        };
        store.add_item(instance, side);
        Some(side)
    }
}

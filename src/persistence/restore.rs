//! Mount-time restore protocol.
//!
//! ```text
//! Idle -> CheckingSnapshot -> Offered | Empty
//! Offered -> (confirm) -> Restored
//! Offered -> (decline) -> ClearedAndFresh
//! ```

use super::Snapshot;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RestoreState {
    #[default]
    Idle,
    CheckingSnapshot,
    /// A restorable snapshot waits for the user's answer.
    Offered(Snapshot),
    /// Nothing to restore.
    Empty,
    Restored,
    /// The offer was declined and the slot wiped.
    ClearedAndFresh,
}

/// Status label as exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RestoreStatus {
    Idle,
    CheckingSnapshot,
    Offered,
    Empty,
    Restored,
    ClearedAndFresh,
}

impl RestoreState {
    pub fn status(&self) -> RestoreStatus {
        match self {
            RestoreState::Idle => RestoreStatus::Idle,
            RestoreState::CheckingSnapshot => RestoreStatus::CheckingSnapshot,
            RestoreState::Offered(_) => RestoreStatus::Offered,
            RestoreState::Empty => RestoreStatus::Empty,
            RestoreState::Restored => RestoreStatus::Restored,
            RestoreState::ClearedAndFresh => RestoreStatus::ClearedAndFresh,
        }
    }

    /// The store may only be mutated once the mount-time flow is over.
    pub fn accepts_mutations(&self) -> bool {
        matches!(
            self,
            RestoreState::Empty | RestoreState::Restored | RestoreState::ClearedAndFresh
        )
    }

    pub fn offered(&self) -> Option<&Snapshot> {
        match self {
            RestoreState::Offered(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

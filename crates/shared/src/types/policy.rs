//! Reference-slot selection policy.

use serde::{Deserialize, Serialize};

/// Decides which slot is authoritative for the shared base value.
///
/// Typing into a slot always makes that slot the source of the base value.
/// The policies differ in what a currency change on the anchor slot keeps:
/// the quantity (`LastEdited`) or the number shown in slot 0 (`FirstSlot`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// The most recently edited slot is the reference. Any currency change
    /// preserves the base value.
    #[default]
    LastEdited,
    /// Slot 0 anchors the session. Changing slot 0's currency keeps its
    /// number and re-derives the base value from it.
    FirstSlot,
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Phase;

/// A directed flow indicator between two phases within one month column.
///
/// Arrows sharing a month form that month's cohort; cohort order is the order
/// in which the arrows were inserted. `start_phase` and `end_phase` always
/// differ for stored arrows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
    pub id: Uuid,
    pub month: String,
    pub start_phase: Phase,
    pub end_phase: Phase,
}

impl Arrow {
    /// True when the arrow points from an earlier phase to a later one.
    pub fn is_down(&self) -> bool {
        self.start_phase.index() < self.end_phase.index()
    }
}

/// Input for creating a new arrow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArrowInput {
    pub month: String,
    pub start_phase: Phase,
    pub end_phase: Phase,
}

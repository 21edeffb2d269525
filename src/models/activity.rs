use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Phase;

/// A text note anchored to one phase × month cell.
///
/// Several activities may share a cell; they stack in insertion order.
/// The `month` label is rewritten whenever that month is renamed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activity {
    pub id: Uuid,
    pub phase: Phase,
    pub month: String,
    pub text: String,
}

impl Activity {
    pub fn is_in_cell(&self, phase: Phase, month: &str) -> bool {
        self.phase == phase && self.month == month
    }
}

/// Input for creating a new activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActivityInput {
    pub phase: Phase,
    /// Label of an existing month column.
    pub month: String,
    /// Note text. Must not be blank.
    pub text: String,
}

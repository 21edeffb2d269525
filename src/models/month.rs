use serde::{Deserialize, Serialize};

/// Input for editing a month label in place.
///
/// The label is stored as given. Activities and arrows referencing the old
/// label follow the rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameMonthInput {
    pub label: String,
}

/// Result of a month rename.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameMonthResult {
    /// `false` when the index was out of range and nothing changed.
    pub renamed: bool,
    pub months: Vec<String>,
}

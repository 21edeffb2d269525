//! Request and response types for MCP tools.

use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================
// Request Types
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RenderBoardRequest {
    #[schemars(description = "Characters per month column (default 24)")]
    #[serde(default)]
    pub width: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddActivityRequest {
    #[schemars(
        description = "Phase row: Empathize, Define, Ideate, Prototype, Test, or Implement"
    )]
    pub phase: String,
    #[schemars(description = "Label of an existing month column")]
    pub month: String,
    #[schemars(description = "The note to place in the cell")]
    pub text: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteActivityRequest {
    #[schemars(description = "The UUID of the activity to delete")]
    pub activity_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddArrowRequest {
    #[schemars(description = "Label of the month column the arrow is drawn in")]
    pub month: String,
    #[schemars(description = "Phase the flow starts from")]
    pub start_phase: String,
    #[schemars(description = "Phase the flow points to (must differ from start_phase)")]
    pub end_phase: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteArrowRequest {
    #[schemars(description = "The UUID of the arrow to delete")]
    pub arrow_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RenameMonthRequest {
    #[schemars(description = "0-based position of the month column")]
    pub index: usize,
    #[schemars(description = "The new label")]
    pub label: String,
}

// ============================================================
// Response Types
// ============================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteResponse {
    pub id: String,
    /// False when nothing had that id.
    pub removed: bool,
}

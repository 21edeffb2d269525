use std::sync::MutexGuard;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::*;
use crate::planner::grid::{ArrowView, BoardView};
use crate::planner::render::DEFAULT_CELL_WIDTH;
use crate::planner::{Planner, PlannerError};
use crate::SharedPlanner;

// ============================================================
// Error Handling
// ============================================================

/// Map a rejected command to a response. A full month is a conflict with the
/// current board; everything else is a bad request.
fn rejection(e: PlannerError) -> (StatusCode, String) {
    let status = match e {
        PlannerError::CapacityExceeded { .. } => StatusCode::CONFLICT,
        _ => StatusCode::BAD_REQUEST,
    };
    tracing::warn!("Rejected request: {}", e);
    (status, e.to_string())
}

fn lock(planner: &SharedPlanner) -> MutexGuard<'_, Planner> {
    planner.lock().expect("planner lock poisoned")
}

/// Response for deletes. Deleting an unknown id is not an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResult {
    pub removed: bool,
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Board
// ============================================================

pub async fn get_board(State(planner): State<SharedPlanner>) -> Json<BoardView> {
    Json(lock(&planner).board())
}

#[derive(Debug, Deserialize)]
pub struct BoardTextQuery {
    pub width: Option<usize>,
}

pub async fn get_board_text(
    State(planner): State<SharedPlanner>,
    Query(query): Query<BoardTextQuery>,
) -> String {
    lock(&planner).render(query.width.unwrap_or(DEFAULT_CELL_WIDTH))
}

pub async fn reset_board(State(planner): State<SharedPlanner>) -> Json<BoardView> {
    let mut planner = lock(&planner);
    planner.reset();
    Json(planner.board())
}

// ============================================================
// Months
// ============================================================

pub async fn list_months(State(planner): State<SharedPlanner>) -> Json<Vec<String>> {
    Json(lock(&planner).months().to_vec())
}

pub async fn rename_month(
    State(planner): State<SharedPlanner>,
    Path(index): Path<usize>,
    Json(input): Json<RenameMonthInput>,
) -> Json<RenameMonthResult> {
    let mut planner = lock(&planner);
    let renamed = planner.rename_month(index, input.label);
    Json(RenameMonthResult {
        renamed,
        months: planner.months().to_vec(),
    })
}

// ============================================================
// Activities
// ============================================================

pub async fn list_activities(State(planner): State<SharedPlanner>) -> Json<Vec<Activity>> {
    Json(lock(&planner).activities().to_vec())
}

pub async fn create_activity(
    State(planner): State<SharedPlanner>,
    Json(input): Json<CreateActivityInput>,
) -> Result<(StatusCode, Json<Activity>), (StatusCode, String)> {
    lock(&planner)
        .add_activity(input)
        .map(|a| (StatusCode::CREATED, Json(a)))
        .map_err(rejection)
}

pub async fn delete_activity(
    State(planner): State<SharedPlanner>,
    Path(id): Path<Uuid>,
) -> Json<DeleteResult> {
    Json(DeleteResult {
        removed: lock(&planner).remove_activity(id),
    })
}

// ============================================================
// Arrows
// ============================================================

pub async fn list_arrows(State(planner): State<SharedPlanner>) -> Json<Vec<Arrow>> {
    Json(lock(&planner).arrows().to_vec())
}

pub async fn create_arrow(
    State(planner): State<SharedPlanner>,
    Json(input): Json<CreateArrowInput>,
) -> Result<(StatusCode, Json<Arrow>), (StatusCode, String)> {
    lock(&planner)
        .add_arrow(input)
        .map(|a| (StatusCode::CREATED, Json(a)))
        .map_err(rejection)
}

pub async fn delete_arrow(
    State(planner): State<SharedPlanner>,
    Path(id): Path<Uuid>,
) -> Json<DeleteResult> {
    Json(DeleteResult {
        removed: lock(&planner).remove_arrow(id),
    })
}

pub async fn arrow_layout(State(planner): State<SharedPlanner>) -> Json<Vec<ArrowView>> {
    Json(lock(&planner).arrow_layout())
}

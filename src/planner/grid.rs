//! The rendering contract: everything a grid surface needs to draw the board.
//!
//! Column 1 holds the phase labels and row 1 the month headers, so month `m`
//! sits in column `m + 2` and phase `p` in row `p + 2`.

use serde::{Deserialize, Serialize};

use crate::models::*;

use super::capacity::{can_add, MAX_ARROWS_PER_MONTH};
use super::cohort::CohortIndex;
use super::layout::{place, ArrowGeometry, HEADER_ROWS};
use super::state::PlannerState;

/// Columns taken by the phase label column.
pub const LABEL_COLUMNS: usize = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardView {
    pub version: u64,
    pub phases: Vec<PhaseRow>,
    pub months: Vec<MonthColumn>,
    /// Row-major: every month of the first phase, then the next phase.
    pub cells: Vec<CellView>,
    pub arrows: Vec<ArrowView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseRow {
    pub phase: Phase,
    pub row: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthColumn {
    pub index: usize,
    pub label: String,
    pub column: usize,
    pub arrow_count: usize,
    pub arrow_limit: usize,
    pub can_add_arrow: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellView {
    pub phase: Phase,
    pub month: String,
    pub row: usize,
    pub column: usize,
    /// Stacked top to bottom in insertion order.
    pub activities: Vec<Activity>,
}

/// An arrow with its month column and geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArrowView {
    pub arrow: Arrow,
    /// `None` when the arrow's month label is not in the month sequence.
    pub column: Option<usize>,
    pub geometry: ArrowGeometry,
}

pub fn phase_row(index: usize) -> usize {
    index + HEADER_ROWS + 1
}

pub fn month_column(index: usize) -> usize {
    index + LABEL_COLUMNS + 1
}

/// Build the full board view from a state snapshot.
pub fn build_board(state: &PlannerState) -> BoardView {
    let cohorts = CohortIndex::build(&state.arrows);

    let phases = Phase::ALL
        .iter()
        .map(|&phase| PhaseRow {
            phase,
            row: phase_row(phase.index()),
        })
        .collect();

    let months = state
        .months
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let arrow_count = cohorts.size(label);
            MonthColumn {
                index,
                label: label.clone(),
                column: month_column(index),
                arrow_count,
                arrow_limit: MAX_ARROWS_PER_MONTH,
                can_add_arrow: can_add(arrow_count),
            }
        })
        .collect();

    let mut cells = Vec::with_capacity(Phase::ALL.len() * state.months.len());
    for phase in Phase::ALL {
        for (index, month) in state.months.iter().enumerate() {
            cells.push(CellView {
                phase,
                month: month.clone(),
                row: phase_row(phase.index()),
                column: month_column(index),
                activities: state.cell_activities(phase, month).cloned().collect(),
            });
        }
    }

    BoardView {
        version: state.version,
        phases,
        months,
        cells,
        arrows: layout_arrows(state, &cohorts),
    }
}

/// Geometry for every arrow, in collection order.
pub fn layout_arrows(state: &PlannerState, cohorts: &CohortIndex<'_>) -> Vec<ArrowView> {
    state
        .arrows
        .iter()
        .filter_map(|arrow| {
            let slot = cohorts.slot(arrow)?;
            match place(&Phase::ALL, arrow, slot) {
                Ok(geometry) => Some(ArrowView {
                    arrow: arrow.clone(),
                    column: state.month_index(&arrow.month).map(month_column),
                    geometry,
                }),
                Err(e) => {
                    tracing::warn!("Skipping arrow {}: {}", arrow.id, e);
                    None
                }
            }
        })
        .collect()
}

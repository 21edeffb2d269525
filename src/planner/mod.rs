//! The planning board engine.
//!
//! [`Planner`] is the single writer for a board. Every mutation goes through
//! one of its commands, which validate against the current
//! [`PlannerState`], apply the change, and then write the touched
//! collections through to an optional [`StateStore`]. Layout
//! ([`grid::build_board`]) is a pure function of a state snapshot and can be
//! recomputed at any time.

pub mod capacity;
pub mod cohort;
mod error;
pub mod grid;
pub mod layout;
pub mod rename;
pub mod render;
pub mod seed;
mod state;

pub use error::PlannerError;
pub use state::PlannerState;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::*;

use self::cohort::CohortIndex;
use self::grid::{ArrowView, BoardView};

/// Durable home for the board's three collections.
///
/// Each collection is written in full after a mutation that touched it.
/// Writes are best effort: a failure is logged and never rolls back the
/// in-memory state.
pub trait StateStore: Send {
    fn save_months(&self, months: &[String]) -> anyhow::Result<()>;
    fn save_activities(&self, activities: &[Activity]) -> anyhow::Result<()>;
    fn save_arrows(&self, arrows: &[Arrow]) -> anyhow::Result<()>;
}

/// A mutation of the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    AddActivity(CreateActivityInput),
    RemoveActivity { id: Uuid },
    AddArrow(CreateArrowInput),
    RemoveArrow { id: Uuid },
    RenameMonth { index: usize, label: String },
    Reset,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddActivity(_) => "add_activity",
            Self::RemoveActivity { .. } => "remove_activity",
            Self::AddArrow(_) => "add_arrow",
            Self::RemoveArrow { .. } => "remove_arrow",
            Self::RenameMonth { .. } => "rename_month",
            Self::Reset => "reset",
        }
    }
}

/// What an accepted command did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    ActivityAdded(Activity),
    ActivityRemoved { removed: bool },
    ArrowAdded(Arrow),
    ArrowRemoved { removed: bool },
    MonthRenamed { renamed: bool },
    Reset,
}

/// The target picked before an add, like a dialog opened on a cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    Cell { phase: Phase, month: String },
    ArrowMonth { month: String },
}

#[derive(Debug, Clone, Copy, Default)]
struct Touched {
    months: bool,
    activities: bool,
    arrows: bool,
}

impl Touched {
    const MONTHS: Self = Self {
        months: true,
        activities: false,
        arrows: false,
    };
    const ACTIVITIES: Self = Self {
        months: false,
        activities: true,
        arrows: false,
    };
    const ARROWS: Self = Self {
        months: false,
        activities: false,
        arrows: true,
    };
    const ALL: Self = Self {
        months: true,
        activities: true,
        arrows: true,
    };
}

pub struct Planner {
    state: PlannerState,
    selection: Option<Selection>,
    store: Option<Box<dyn StateStore>>,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlannerState::seeded())
    }
}

impl Planner {
    /// A planner with no durable store.
    pub fn new(state: PlannerState) -> Self {
        Self {
            state,
            selection: None,
            store: None,
        }
    }

    pub fn with_store(state: PlannerState, store: impl StateStore + 'static) -> Self {
        Self {
            state,
            selection: None,
            store: Some(Box::new(store)),
        }
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn version(&self) -> u64 {
        self.state.version
    }

    pub fn months(&self) -> &[String] {
        &self.state.months
    }

    pub fn activities(&self) -> &[Activity] {
        &self.state.activities
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.state.arrows
    }

    pub fn board(&self) -> BoardView {
        grid::build_board(&self.state)
    }

    pub fn arrow_layout(&self) -> Vec<ArrowView> {
        grid::layout_arrows(&self.state, &CohortIndex::build(&self.state.arrows))
    }

    pub fn render(&self, cell_width: usize) -> String {
        render::render_board(&self.board(), cell_width)
    }

    /// Dispatch a command.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, PlannerError> {
        let name = command.name();
        tracing::debug!("Applying {}", name);

        let result = match command {
            Command::AddActivity(input) => self.add_activity(input).map(Outcome::ActivityAdded),
            Command::RemoveActivity { id } => Ok(Outcome::ActivityRemoved {
                removed: self.remove_activity(id),
            }),
            Command::AddArrow(input) => self.add_arrow(input).map(Outcome::ArrowAdded),
            Command::RemoveArrow { id } => Ok(Outcome::ArrowRemoved {
                removed: self.remove_arrow(id),
            }),
            Command::RenameMonth { index, label } => Ok(Outcome::MonthRenamed {
                renamed: self.rename_month(index, label),
            }),
            Command::Reset => {
                self.reset();
                Ok(Outcome::Reset)
            }
        };

        if let Err(e) = &result {
            tracing::debug!("{} rejected: {}", name, e);
        }
        result
    }

    pub fn add_activity(&mut self, input: CreateActivityInput) -> Result<Activity, PlannerError> {
        let activity = self.state.add_activity(input)?;
        tracing::info!(
            "Added activity {} to {} / {}",
            activity.id,
            activity.phase,
            activity.month
        );
        self.write_through(Touched::ACTIVITIES);
        Ok(activity)
    }

    pub fn remove_activity(&mut self, id: Uuid) -> bool {
        let removed = self.state.remove_activity(id);
        if removed {
            self.write_through(Touched::ACTIVITIES);
        }
        removed
    }

    pub fn add_arrow(&mut self, input: CreateArrowInput) -> Result<Arrow, PlannerError> {
        let arrow = match self.state.add_arrow(input) {
            Ok(arrow) => arrow,
            Err(e @ PlannerError::CapacityExceeded { .. }) => {
                tracing::warn!("{}", e);
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        tracing::info!(
            "Added arrow {} in {}: {} -> {}",
            arrow.id,
            arrow.month,
            arrow.start_phase,
            arrow.end_phase
        );
        self.write_through(Touched::ARROWS);
        Ok(arrow)
    }

    pub fn remove_arrow(&mut self, id: Uuid) -> bool {
        let removed = self.state.remove_arrow(id);
        if removed {
            self.write_through(Touched::ARROWS);
        }
        removed
    }

    /// Relabel a month column, carrying its activities and arrows along.
    ///
    /// The label update and the migration land in one step; nothing can
    /// observe the board in between.
    pub fn rename_month(&mut self, index: usize, label: impl Into<String>) -> bool {
        let before = self.state.version;
        let renamed = self.state.rename_month(index, label.into());
        if self.state.version != before {
            self.write_through(Touched::ALL);
        }
        renamed
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.selection = None;
        tracing::info!("Board reset to seed data");
        self.write_through(Touched::ALL);
    }

    // ============================================================
    // Selection
    // ============================================================

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Pick the cell the next [`Planner::add_selected_activity`] targets.
    pub fn request_add_activity(&mut self, phase: Phase, month: impl Into<String>) {
        self.selection = Some(Selection::Cell {
            phase,
            month: month.into(),
        });
    }

    /// Pick the month the next [`Planner::add_selected_arrow`] targets.
    pub fn request_add_arrow(&mut self, month: impl Into<String>) {
        self.selection = Some(Selection::ArrowMonth {
            month: month.into(),
        });
    }

    pub fn cancel_selection(&mut self) {
        self.selection = None;
    }

    /// Add an activity to the selected cell.
    ///
    /// Blank text leaves the selection open for another try; any other
    /// result closes it.
    pub fn add_selected_activity(&mut self, text: impl Into<String>) -> Result<Activity, PlannerError> {
        let Some(Selection::Cell { phase, month }) = self.selection.clone() else {
            return Err(PlannerError::NoSelection("cell"));
        };

        let result = self.add_activity(CreateActivityInput {
            phase,
            month,
            text: text.into(),
        });
        if !matches!(result, Err(PlannerError::BlankText)) {
            self.selection = None;
        }
        result
    }

    /// Add an arrow to the selected month.
    ///
    /// A same-phase pair leaves the selection open; a full month closes it
    /// along with the warning, as does success.
    pub fn add_selected_arrow(
        &mut self,
        start_phase: Phase,
        end_phase: Phase,
    ) -> Result<Arrow, PlannerError> {
        let Some(Selection::ArrowMonth { month }) = self.selection.clone() else {
            return Err(PlannerError::NoSelection("month"));
        };

        let result = self.add_arrow(CreateArrowInput {
            month,
            start_phase,
            end_phase,
        });
        if !matches!(result, Err(PlannerError::InvalidArrow(_))) {
            self.selection = None;
        }
        result
    }

    fn write_through(&self, touched: Touched) {
        let Some(store) = &self.store else {
            return;
        };

        if touched.months {
            if let Err(e) = store.save_months(&self.state.months) {
                tracing::warn!("Failed to persist months: {:#}", e);
            }
        }
        if touched.activities {
            if let Err(e) = store.save_activities(&self.state.activities) {
                tracing::warn!("Failed to persist activities: {:#}", e);
            }
        }
        if touched.arrows {
            if let Err(e) = store.save_arrows(&self.state.arrows) {
                tracing::warn!("Failed to persist arrows: {:#}", e);
            }
        }
    }
}

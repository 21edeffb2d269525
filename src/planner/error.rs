use thiserror::Error;

use crate::models::Phase;

use super::capacity::MAX_ARROWS_PER_MONTH;

/// Expected rejections of planner commands.
///
/// None of these leave a trace in the planner state: a rejected command is
/// refused before anything is mutated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("Maximum {limit} arrows per month allowed ({month} is full)")]
    CapacityExceeded { month: String, limit: usize },

    #[error("Arrow must connect two different phases (got {0} to {0})")]
    InvalidArrow(Phase),

    #[error("Unknown phase: {0}")]
    UnknownPhase(String),

    #[error("Month not found: {0}")]
    UnknownMonth(String),

    #[error("Activity text must not be blank")]
    BlankText,

    #[error("No {0} selected")]
    NoSelection(&'static str),
}

impl PlannerError {
    pub fn capacity_exceeded(month: &str) -> Self {
        Self::CapacityExceeded {
            month: month.to_string(),
            limit: MAX_ARROWS_PER_MONTH,
        }
    }

    /// Parse a phase label at a command boundary.
    pub fn parse_phase(label: &str) -> Result<Phase, Self> {
        Phase::from_str(label).ok_or_else(|| Self::UnknownPhase(label.to_string()))
    }
}

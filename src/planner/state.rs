use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::*;

use super::capacity::can_add_to;
use super::error::PlannerError;
use super::rename::migrate;
use super::seed;

/// The board's mutable collections.
///
/// `version` increases by one for every mutation that changes a collection,
/// so observers can tell whether a layout they computed is stale. Every
/// method validates before touching anything: a rejected command leaves the
/// state exactly as it was.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannerState {
    pub version: u64,
    pub months: Vec<String>,
    pub activities: Vec<Activity>,
    pub arrows: Vec<Arrow>,
}

impl Default for PlannerState {
    fn default() -> Self {
        Self::seeded()
    }
}

impl PlannerState {
    pub fn new(months: Vec<String>, activities: Vec<Activity>, arrows: Vec<Arrow>) -> Self {
        Self {
            version: 0,
            months,
            activities,
            arrows,
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed::months(), seed::activities(), seed::arrows())
    }

    /// Column position of the first month labelled `label`.
    pub fn month_index(&self, label: &str) -> Option<usize> {
        self.months.iter().position(|m| m == label)
    }

    pub fn has_month(&self, label: &str) -> bool {
        self.month_index(label).is_some()
    }

    /// Activities stacked in one cell, in insertion order.
    pub fn cell_activities<'a>(
        &'a self,
        phase: Phase,
        month: &'a str,
    ) -> impl Iterator<Item = &'a Activity> + 'a {
        self.activities
            .iter()
            .filter(move |a| a.is_in_cell(phase, month))
    }

    pub fn add_activity(&mut self, input: CreateActivityInput) -> Result<Activity, PlannerError> {
        if input.text.trim().is_empty() {
            return Err(PlannerError::BlankText);
        }
        if !self.has_month(&input.month) {
            return Err(PlannerError::UnknownMonth(input.month));
        }

        let activity = Activity {
            id: Uuid::new_v4(),
            phase: input.phase,
            month: input.month,
            text: input.text,
        };
        self.activities.push(activity.clone());
        self.bump();
        Ok(activity)
    }

    /// Returns `false` when no activity has `id`.
    pub fn remove_activity(&mut self, id: Uuid) -> bool {
        let Some(pos) = self.activities.iter().position(|a| a.id == id) else {
            return false;
        };
        self.activities.remove(pos);
        self.bump();
        true
    }

    pub fn add_arrow(&mut self, input: CreateArrowInput) -> Result<Arrow, PlannerError> {
        if input.start_phase == input.end_phase {
            return Err(PlannerError::InvalidArrow(input.start_phase));
        }
        if !self.has_month(&input.month) {
            return Err(PlannerError::UnknownMonth(input.month));
        }
        if !can_add_to(&self.arrows, &input.month) {
            return Err(PlannerError::capacity_exceeded(&input.month));
        }

        let arrow = Arrow {
            id: Uuid::new_v4(),
            month: input.month,
            start_phase: input.start_phase,
            end_phase: input.end_phase,
        };
        self.arrows.push(arrow.clone());
        self.bump();
        Ok(arrow)
    }

    /// Returns `false` when no arrow has `id`.
    pub fn remove_arrow(&mut self, id: Uuid) -> bool {
        let Some(pos) = self.arrows.iter().position(|a| a.id == id) else {
            return false;
        };
        self.arrows.remove(pos);
        self.bump();
        true
    }

    /// Relabel the month at `index` and migrate everything that referenced
    /// the old label. Returns `false` when `index` is out of range.
    ///
    /// Renaming a month to its current label changes nothing and does not
    /// bump the version.
    pub fn rename_month(&mut self, index: usize, label: String) -> bool {
        let Some(old) = self.months.get(index).cloned() else {
            return false;
        };
        if old == label {
            return true;
        }

        if self
            .months
            .iter()
            .enumerate()
            .any(|(i, m)| i != index && *m == label)
        {
            tracing::warn!(
                "Month label '{}' is now used by more than one column; their arrows share capacity",
                label
            );
        }

        let migrated = migrate(
            &old,
            &label,
            std::mem::take(&mut self.activities),
            std::mem::take(&mut self.arrows),
        );
        tracing::debug!(
            "Renamed month '{}' to '{}' ({} activities, {} arrows moved)",
            old,
            label,
            migrated.moved_activities,
            migrated.moved_arrows
        );

        self.months[index] = label;
        self.activities = migrated.activities;
        self.arrows = migrated.arrows;
        self.bump();
        true
    }

    /// Restore the seed collections. The version keeps counting.
    pub fn reset(&mut self) {
        let version = self.version;
        *self = Self::seeded();
        self.version = version + 1;
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}

//! Cohort and slot resolution.
//!
//! The cohort of an arrow is every arrow sharing its month label, in the order
//! the arrows sit in the collection. An arrow's slot is its position in that
//! cohort. Both are derived from the full collection each time they are asked
//! for; inserting or deleting an arrow shifts the slots of its cohort.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Arrow;

/// Horizontal position of an arrow among the arrows of its month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slot {
    /// 0-based position within the cohort.
    pub index: usize,
    /// Size of the cohort.
    pub total: usize,
}

/// Arrows sharing `month`, in collection order.
pub fn cohort<'a>(arrows: &'a [Arrow], month: &'a str) -> impl Iterator<Item = &'a Arrow> + 'a {
    arrows.iter().filter(move |a| a.month == month)
}

pub fn cohort_size(arrows: &[Arrow], month: &str) -> usize {
    cohort(arrows, month).count()
}

/// Slot of the arrow with `arrow_id`, or `None` if it is not in the collection.
pub fn slot_of(arrows: &[Arrow], arrow_id: Uuid) -> Option<Slot> {
    let arrow = arrows.iter().find(|a| a.id == arrow_id)?;
    let members: Vec<&Arrow> = cohort(arrows, &arrow.month).collect();
    let index = members.iter().position(|a| a.id == arrow_id)?;
    Some(Slot {
        index,
        total: members.len(),
    })
}

/// Month → ordered arrow ids, built once per layout pass.
///
/// Querying the index per arrow keeps a full pass linear in the number of
/// arrows instead of re-filtering the collection for each one.
#[derive(Debug, Default)]
pub struct CohortIndex<'a> {
    by_month: HashMap<&'a str, Vec<Uuid>>,
}

impl<'a> CohortIndex<'a> {
    pub fn build(arrows: &'a [Arrow]) -> Self {
        let mut by_month: HashMap<&'a str, Vec<Uuid>> = HashMap::new();
        for arrow in arrows {
            by_month.entry(arrow.month.as_str()).or_default().push(arrow.id);
        }
        Self { by_month }
    }

    pub fn size(&self, month: &str) -> usize {
        self.by_month.get(month).map_or(0, Vec::len)
    }

    pub fn slot(&self, arrow: &Arrow) -> Option<Slot> {
        let members = self.by_month.get(arrow.month.as_str())?;
        let index = members.iter().position(|id| *id == arrow.id)?;
        Some(Slot {
            index,
            total: members.len(),
        })
    }
}

//! Arrow geometry.
//!
//! Maps an arrow's phases onto grid rows and places its line inside the
//! block of rows it spans. Coordinates inside the block are fractions in
//! `[0, 1]`: `x` across the month column, `y` down the block.
//!
//! Grid rows are 1-indexed. Row 1 holds the month headers and phase `i`
//! occupies row `i + 2`, so an arrow between phases `min..=max` covers rows
//! `min + 2` up to the exclusive boundary `max + 3`.
//!
//! ```text
//!   row 2  Empathize  |          |
//!   row 3  Define     |    o     |  <- y = 0.5 / span
//!   row 4  Ideate     |    |     |
//!   row 5  Prototype  |    |     |
//!   row 6  Test       |    v     |  <- y = (span - 0.5) / span
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Arrow, Phase};

use super::cohort::Slot;

/// Rows taken by the header above the first phase row.
pub const HEADER_ROWS: usize = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Phase {0} is not part of the phase sequence")]
    PhaseNotInSequence(Phase),

    #[error("Slot {index} is outside a cohort of {total}")]
    SlotOutOfRange { index: usize, total: usize },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Down,
    Up,
}

/// The contiguous block of grid rows an arrow covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RowSpan {
    /// First grid row (1-indexed, header included).
    pub start: usize,
    /// Exclusive end boundary.
    pub end: usize,
    /// Number of phase rows covered.
    pub len: usize,
}

/// A point inside the arrow's block, as fractions of its width and height.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The point as percentages, the unit the drawing surface expects.
    pub fn as_percent(&self) -> Point {
        Point {
            x: self.x * 100.0,
            y: self.y * 100.0,
        }
    }
}

/// Renderable placement of one arrow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArrowGeometry {
    pub arrow_id: Uuid,
    pub rows: RowSpan,
    pub direction: Direction,
    pub start: Point,
    pub end: Point,
    pub slot: Slot,
    /// Arrowhead marker reference, unique per arrow.
    pub marker_id: String,
}

/// Lay out `arrow` within `phases` at cohort position `slot`.
pub fn place(phases: &[Phase], arrow: &Arrow, slot: Slot) -> Result<ArrowGeometry, LayoutError> {
    if slot.index >= slot.total {
        return Err(LayoutError::SlotOutOfRange {
            index: slot.index,
            total: slot.total,
        });
    }

    let start_idx = position(phases, arrow.start_phase)?;
    let end_idx = position(phases, arrow.end_phase)?;
    let rows = row_span(start_idx, end_idx);
    let (top, bottom) = endpoint_fractions(rows.len);

    let is_down = start_idx < end_idx;
    let (y1, y2) = if is_down { (top, bottom) } else { (bottom, top) };
    let x = slot_x(slot);

    Ok(ArrowGeometry {
        arrow_id: arrow.id,
        rows,
        direction: if is_down {
            Direction::Down
        } else {
            Direction::Up
        },
        start: Point { x, y: y1 },
        end: Point { x, y: y2 },
        slot,
        marker_id: marker_id(arrow.id),
    })
}

/// Grid rows covered by an arrow between phase positions `a` and `b`.
pub fn row_span(a: usize, b: usize) -> RowSpan {
    let min = a.min(b);
    let max = a.max(b);
    RowSpan {
        start: min + HEADER_ROWS + 1,
        end: max + HEADER_ROWS + 2,
        len: max - min + 1,
    }
}

/// Vertical centers of the first and last phase rows of a block `span` rows tall.
pub fn endpoint_fractions(span: usize) -> (f64, f64) {
    let span = span as f64;
    (0.5 / span, (span - 0.5) / span)
}

/// Horizontal position of a slot, spreading the cohort evenly with equal margins.
pub fn slot_x(slot: Slot) -> f64 {
    (2 * slot.index + 1) as f64 / (2 * slot.total) as f64
}

pub fn marker_id(arrow_id: Uuid) -> String {
    format!("arrowhead-{}", arrow_id)
}

fn position(phases: &[Phase], phase: Phase) -> Result<usize, LayoutError> {
    phases
        .iter()
        .position(|p| *p == phase)
        .ok_or(LayoutError::PhaseNotInSequence(phase))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn arrow(start: Phase, end: Phase) -> Arrow {
        Arrow {
            id: Uuid::new_v4(),
            month: "Sept".to_string(),
            start_phase: start,
            end_phase: end,
        }
    }

    fn only() -> Slot {
        Slot { index: 0, total: 1 }
    }

    #[test]
    fn define_to_test_spans_four_rows() {
        let geometry = place(&Phase::ALL, &arrow(Phase::Define, Phase::Test), only()).unwrap();

        assert_eq!(
            geometry.rows,
            RowSpan {
                start: 3,
                end: 7,
                len: 4
            }
        );
        assert_eq!(geometry.direction, Direction::Down);
        assert!((geometry.start.y - 0.125).abs() < EPS);
        assert!((geometry.end.y - 0.875).abs() < EPS);
        assert!((geometry.start.x - 0.5).abs() < EPS);
    }

    #[test]
    fn upward_arrow_swaps_endpoints() {
        let geometry = place(&Phase::ALL, &arrow(Phase::Test, Phase::Define), only()).unwrap();

        assert_eq!(geometry.direction, Direction::Up);
        assert_eq!(geometry.rows.start, 3);
        assert_eq!(geometry.rows.end, 7);
        assert!((geometry.start.y - 0.875).abs() < EPS);
        assert!((geometry.end.y - 0.125).abs() < EPS);
    }

    #[test]
    fn adjacent_phases_center_on_each_row() {
        let geometry =
            place(&Phase::ALL, &arrow(Phase::Empathize, Phase::Define), only()).unwrap();
        assert_eq!(geometry.rows.len, 2);
        assert_eq!(geometry.rows.start, 2);
        assert!((geometry.start.y - 0.25).abs() < EPS);
        assert!((geometry.end.y - 0.75).abs() < EPS);
    }

    #[test]
    fn single_row_sits_on_the_midline() {
        for phase in Phase::ALL {
            let geometry = place(&Phase::ALL, &arrow(phase, phase), only()).unwrap();
            assert_eq!(geometry.rows.len, 1);
            assert!((geometry.start.y - 0.5).abs() < EPS);
            assert!((geometry.end.y - 0.5).abs() < EPS);
        }
    }

    #[test]
    fn slots_are_distinct_and_symmetric() {
        for total in 1..=3 {
            let xs: Vec<f64> = (0..total)
                .map(|index| slot_x(Slot { index, total }))
                .collect();

            for (i, x) in xs.iter().enumerate() {
                assert!(*x > 0.0 && *x < 1.0);
                let mirror = xs[total - 1 - i];
                assert!((x + mirror - 1.0).abs() < EPS);
                for other in &xs[i + 1..] {
                    assert!((x - other).abs() > EPS);
                }
            }
        }
    }

    #[test]
    fn three_slots_land_on_sixths() {
        let xs: Vec<f64> = (0..3)
            .map(|index| slot_x(Slot { index, total: 3 }))
            .collect();
        assert!((xs[0] - 1.0 / 6.0).abs() < EPS);
        assert!((xs[1] - 0.5).abs() < EPS);
        assert!((xs[2] - 5.0 / 6.0).abs() < EPS);
    }

    #[test]
    fn percent_conversion() {
        let geometry = place(&Phase::ALL, &arrow(Phase::Define, Phase::Test), only()).unwrap();
        let start = geometry.start.as_percent();
        assert!((start.x - 50.0).abs() < EPS);
        assert!((start.y - 12.5).abs() < EPS);
    }

    #[test]
    fn marker_is_keyed_by_arrow() {
        let a = arrow(Phase::Define, Phase::Ideate);
        let b = arrow(Phase::Define, Phase::Ideate);
        let ga = place(&Phase::ALL, &a, only()).unwrap();
        let gb = place(&Phase::ALL, &b, only()).unwrap();
        assert_eq!(ga.marker_id, format!("arrowhead-{}", a.id));
        assert_ne!(ga.marker_id, gb.marker_id);
    }

    #[test]
    fn rejects_phase_outside_sequence() {
        let phases = [Phase::Empathize, Phase::Define];
        let err = place(&phases, &arrow(Phase::Define, Phase::Test), only()).unwrap_err();
        assert_eq!(err, LayoutError::PhaseNotInSequence(Phase::Test));
    }

    #[test]
    fn rejects_slot_outside_cohort() {
        let err = place(
            &Phase::ALL,
            &arrow(Phase::Define, Phase::Test),
            Slot { index: 2, total: 2 },
        )
        .unwrap_err();
        assert_eq!(err, LayoutError::SlotOutOfRange { index: 2, total: 2 });
    }
}

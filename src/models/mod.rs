//! Domain models for the phase planner.
//!
//! # Core Concepts
//!
//! - [`Phase`]: one of six fixed, ordered stages. Phases form the grid's rows and
//!   never change at runtime.
//! - Months: plain string labels held by the planner state. Their order decides
//!   the grid column, and a label can be edited in place.
//! - [`Activity`]: a text note pinned to one phase × month cell.
//! - [`Arrow`]: a directed flow between two phases inside a single month column.
//!
//! Activities and arrows reference phases and months by label, never by index.

mod activity;
mod arrow;
mod month;
mod phase;

pub use activity::*;
pub use arrow::*;
pub use month::*;
pub use phase::*;

pub mod api;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod planner;

use std::sync::{Arc, Mutex};

/// A planner shared between request handlers.
///
/// The mutex makes the planner the single writer: each command runs to
/// completion, durable write included, before the next one starts.
pub type SharedPlanner = Arc<Mutex<planner::Planner>>;

pub fn share(planner: planner::Planner) -> SharedPlanner {
    Arc::new(Mutex::new(planner))
}

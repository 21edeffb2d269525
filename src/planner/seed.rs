//! Built-in starting board, used when nothing usable is stored.

use uuid::Uuid;

use crate::models::{Activity, Arrow, Phase};

pub const SEED_MONTHS: [&str; 5] = ["September", "October", "November", "December", "January"];

pub fn months() -> Vec<String> {
    SEED_MONTHS.iter().map(|m| m.to_string()).collect()
}

pub fn activities() -> Vec<Activity> {
    [
        (1, Phase::Empathize, "September", "Stakeholder Interviews"),
        (2, Phase::Define, "October", "Problem Statement"),
        (3, Phase::Ideate, "October", "Brainstorming Session"),
        (4, Phase::Prototype, "November", "Low-fi Wireframes"),
    ]
    .into_iter()
    .map(|(n, phase, month, text)| Activity {
        id: Uuid::from_u128(n),
        phase,
        month: month.to_string(),
        text: text.to_string(),
    })
    .collect()
}

pub fn arrows() -> Vec<Arrow> {
    Vec::new()
}

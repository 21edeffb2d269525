use serde::{Deserialize, Serialize};

/// A stage of the design-thinking process.
///
/// The declaration order is the row order of the grid: `Empathize` is the
/// topmost phase row and `Implement` the bottom one. Phases serialize as their
/// label, which is also how activities and arrows refer to them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Empathize,
    Define,
    Ideate,
    Prototype,
    Test,
    Implement,
}

impl Phase {
    /// The fixed phase sequence, top row first.
    pub const ALL: [Phase; 6] = [
        Self::Empathize,
        Self::Define,
        Self::Ideate,
        Self::Prototype,
        Self::Test,
        Self::Implement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empathize => "Empathize",
            Self::Define => "Define",
            Self::Ideate => "Ideate",
            Self::Prototype => "Prototype",
            Self::Test => "Test",
            Self::Implement => "Implement",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Empathize" => Some(Self::Empathize),
            "Define" => Some(Self::Define),
            "Ideate" => Some(Self::Ideate),
            "Prototype" => Some(Self::Prototype),
            "Test" => Some(Self::Test),
            "Implement" => Some(Self::Implement),
            _ => None,
        }
    }

    /// Position of this phase in [`Phase::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

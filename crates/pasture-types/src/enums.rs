//! Enumeration types for the Pasture simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Liveness
// ---------------------------------------------------------------------------

/// Whether a forager is still taking part in the simulation.
///
/// The only transition is `Alive -> Dead`, made by a wolf's hunt. Dead
/// agents stay in the registry with their position and store frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Liveness {
    /// The agent moves, eats, and shares.
    #[default]
    Alive,
    /// The agent was caught by a wolf.
    Dead,
}

impl Liveness {
    /// Returns `true` for [`Liveness::Alive`].
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }
}

impl core::fmt::Display for Liveness {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Alive => write!(f, "Y"),
            Self::Dead => write!(f, "N"),
        }
    }
}

// ---------------------------------------------------------------------------
// Heading
// ---------------------------------------------------------------------------

/// The direction a wolf travels in a single move.
///
/// North and South change `y`; East and West change `x`. Exactly one axis
/// changes per move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    /// Towards increasing `y`.
    North,
    /// Towards increasing `x`.
    East,
    /// Towards decreasing `y`.
    South,
    /// Towards decreasing `x`.
    West,
}

impl Heading {
    /// Map a uniform roll in `[0, 1)` onto a heading by quarters.
    ///
    /// `[0, 0.25)` is North, `[0.25, 0.5)` East, `[0.5, 0.75)` South, and
    /// everything else West.
    pub fn from_roll(roll: f64) -> Self {
        if roll < 0.25 {
            Self::North
        } else if roll < 0.5 {
            Self::East
        } else if roll < 0.75 {
            Self::South
        } else {
            Self::West
        }
    }

    /// Unit offset `(dy, dx)` for this heading.
    pub const fn unit_offset(self) -> (i64, i64) {
        match self {
            Self::North => (1, 0),
            Self::East => (0, 1),
            Self::South => (-1, 0),
            Self::West => (0, -1),
        }
    }
}

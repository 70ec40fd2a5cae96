//! Core value types and entity snapshots.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::Liveness;
use crate::ids::{AgentId, WolfId};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A cell coordinate on the grid.
///
/// `y` indexes rows and `x` indexes columns. Both are always within the
/// grid's bounds; movement code wraps instead of clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Column index.
    pub x: u32,
    /// Row index.
    pub y: u32,
}

impl Position {
    /// Create a position from `(y, x)` in row-major order.
    pub const fn new(y: u32, x: u32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance on raw coordinates.
    ///
    /// No toroidal shortcut is taken: two agents on opposite edges of the
    /// grid are far apart even though they are one wrap step away.
    pub fn squared_distance(self, other: Self) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }

    /// Euclidean distance on raw coordinates.
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x.abs_diff(other.x));
        let dy = f64::from(self.y.abs_diff(other.y));
        dx.hypot(dy)
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "x={:03}, y={:03}", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Colour
// ---------------------------------------------------------------------------

/// Error returned when a string is not a `#rrggbb` colour.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour {0:?}: expected #rrggbb")]
pub struct ColourParseError(pub String);

/// A cosmetic 24-bit display colour.
///
/// Assigned once at creation and used only by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Colour(u32);

impl Colour {
    /// Largest representable colour value.
    pub const MAX: u32 = 0x00ff_ffff;

    /// Create a colour from a packed `0xrrggbb` value. Higher bits are masked.
    pub const fn from_rgb(rgb: u32) -> Self {
        Self(rgb & Self::MAX)
    }
}

impl core::fmt::Display for Colour {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_string()
    }
}

impl TryFrom<String> for Colour {
    type Error = ColourParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value
            .strip_prefix('#')
            .filter(|h| h.len() == 6)
            .ok_or_else(|| ColourParseError(value.clone()))?;
        let rgb = u32::from_str_radix(hex, 16).map_err(|_parse_err| ColourParseError(value.clone()))?;
        Ok(Self(rgb))
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Point-in-time view of a forager, for reports and renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    /// The agent's identifier.
    pub id: AgentId,
    /// Current cell.
    pub position: Position,
    /// Accumulated resource.
    pub store: Decimal,
    /// Number of moves taken so far.
    pub moves: u64,
    /// Whether the agent is still alive.
    pub liveness: Liveness,
    /// Display colour.
    pub colour: Colour,
}

/// Point-in-time view of a wolf, for reports and renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WolfSnapshot {
    /// The wolf's identifier.
    pub id: WolfId,
    /// Current cell.
    pub position: Position,
    /// Cumulative number of agents caught.
    pub kills: u32,
    /// Display colour.
    pub colour: Colour,
}

/// Snapshot of the whole population, in identifier order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    /// Every forager, alive or dead.
    pub agents: Vec<AgentSnapshot>,
    /// Every wolf.
    pub wolves: Vec<WolfSnapshot>,
}

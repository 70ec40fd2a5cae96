//! Predators: the wolf pack.
//!
//! A [`Wolf`] strides three cells along one compass axis per move and kills
//! every live forager standing on its cell. Wolves never die and are never
//! removed; their kill counts only grow.

use pasture_types::{AgentId, Colour, Heading, Liveness, Position, WolfId, WolfSnapshot};
use pasture_world::wrap_step;
use rand::Rng;
use tracing::info;

use crate::agent::Agent;

/// Number of cells a wolf covers in one move.
pub const WOLF_STRIDE: i64 = 3;

/// A single kill made during a hunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillRecord {
    /// The wolf that made the kill.
    pub wolf: WolfId,
    /// The agent that was killed.
    pub agent: AgentId,
    /// Where it happened.
    pub position: Position,
}

/// A predator on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wolf {
    /// Creation-order identifier.
    pub id: WolfId,
    /// Current cell.
    pub position: Position,
    /// Cumulative number of agents killed.
    pub kills: u32,
    /// Cosmetic display colour.
    pub colour: Colour,
    /// Largest valid `y` on the grid.
    pub y_bound: u32,
    /// Largest valid `x` on the grid.
    pub x_bound: u32,
}

impl Wolf {
    /// Create a wolf with no kills at `position`.
    pub const fn new(id: WolfId, position: Position, y_bound: u32, x_bound: u32, colour: Colour) -> Self {
        Self {
            id,
            position,
            kills: 0,
            colour,
            y_bound,
            x_bound,
        }
    }

    /// Take one stride in a random compass direction.
    ///
    /// A single uniform roll picks the heading by quarters; only the axis
    /// of that heading changes, wrapping at the grid edges.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Heading {
        let heading = Heading::from_roll(rng.random::<f64>());
        let (dy, dx) = heading.unit_offset();
        self.position = Position::new(
            wrap_step(self.position.y, dy.saturating_mul(WOLF_STRIDE), self.y_bound),
            wrap_step(self.position.x, dx.saturating_mul(WOLF_STRIDE), self.x_bound),
        );
        heading
    }

    /// Kill every live agent on this wolf's cell.
    ///
    /// Already-dead agents are ignored, so hunting the same cell twice does
    /// not count the same victim twice.
    pub fn hunt(&mut self, agents: &mut [Agent]) -> Vec<KillRecord> {
        let mut records = Vec::new();
        for agent in agents
            .iter_mut()
            .filter(|a| a.is_alive() && a.position == self.position)
        {
            agent.liveness = Liveness::Dead;
            self.kills = self.kills.saturating_add(1);
            info!(
                wolf = %self.id,
                agent = %agent.id,
                x = self.position.x,
                y = self.position.y,
                wolf_kills = self.kills,
                "Kill"
            );
            records.push(KillRecord {
                wolf: self.id,
                agent: agent.id,
                position: self.position,
            });
        }
        records
    }

    /// Point-in-time view of this wolf.
    pub const fn snapshot(&self) -> WolfSnapshot {
        WolfSnapshot {
            id: self.id,
            position: self.position,
            kills: self.kills,
            colour: self.colour,
        }
    }
}

impl core::fmt::Display for Wolf {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Wolf {}: {}, kills={}", self.id, self.position, self.kills)
    }
}

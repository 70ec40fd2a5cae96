//! Foragers: the grazing agents of the simulation.
//!
//! An [`Agent`] wanders the grid one diagonal cell at a time, eats from the
//! cell it lands on, and evens out its store with nearby agents. It is
//! either alive or dead; a dead agent is frozen in place with whatever it
//! was carrying when a wolf caught it.
//!
//! Every behaviour that needs randomness takes the generator as a
//! parameter so runs are reproducible from a seed.

use pasture_types::{AgentId, AgentSnapshot, Colour, Liveness, Position};
use pasture_world::{Grid, deposit, harvest, wrap_step};
use rand::Rng;
use rust_decimal::Decimal;

use crate::config::ForagingConfig;
use crate::error::AgentError;

/// What happened to the grid and store during one meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EatOutcome {
    /// Units taken from the cell.
    pub taken: Decimal,
    /// Units returned to the cell because the store went over the cap.
    /// `None` when the store stayed within the cap.
    pub disgorged: Option<Decimal>,
}

/// A forager on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    /// Creation-order identifier.
    pub id: AgentId,
    /// Current cell.
    pub position: Position,
    /// Accumulated resource; never negative.
    pub store: Decimal,
    /// Number of steps taken.
    pub moves: u64,
    /// Alive or dead.
    pub liveness: Liveness,
    /// Cosmetic display colour.
    pub colour: Colour,
    /// Largest valid `y` on the grid this agent lives on.
    pub y_bound: u32,
    /// Largest valid `x` on the grid this agent lives on.
    pub x_bound: u32,
}

impl Agent {
    /// Create a live agent with an empty store at `position`.
    pub const fn new(id: AgentId, position: Position, y_bound: u32, x_bound: u32, colour: Colour) -> Self {
        Self {
            id,
            position,
            store: Decimal::ZERO,
            moves: 0,
            liveness: Liveness::Alive,
            colour,
            y_bound,
            x_bound,
        }
    }

    /// Whether the agent is still alive.
    pub const fn is_alive(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Take one diagonal step.
    ///
    /// For each axis (`y` first, then `x`) a fair coin decides between +1
    /// and -1, wrapping at the grid edges, so each of the four diagonal
    /// neighbours is equally likely. Increments `moves`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::AgentDead`] if the agent has been killed.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Result<Position, AgentError> {
        self.ensure_alive()?;

        let dy = if rng.random::<bool>() { 1 } else { -1 };
        let dx = if rng.random::<bool>() { 1 } else { -1 };
        self.position = Position::new(
            wrap_step(self.position.y, dy, self.y_bound),
            wrap_step(self.position.x, dx, self.x_bound),
        );
        self.moves = self.moves.saturating_add(1);
        Ok(self.position)
    }

    /// Eat from the current cell.
    ///
    /// Takes `bite_size` units, or whatever is left if the cell holds less,
    /// and adds them to the store. If the store then exceeds `store_cap`,
    /// the *entire* store is put back into the cell and the store is reset
    /// to zero. This can leave the agent poorer than before it ate.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::AgentDead`] if the agent has been killed, or
    /// [`AgentError::World`] if the grid rejects the access.
    pub fn eat(&mut self, grid: &mut Grid, config: &ForagingConfig) -> Result<EatOutcome, AgentError> {
        self.ensure_alive()?;

        let taken = harvest(grid, self.position, config.bite_size)?;
        self.store = self
            .store
            .checked_add(taken)
            .ok_or_else(|| AgentError::ArithmeticOverflow {
                context: String::from("store after eating"),
            })?;

        let disgorged = if self.store > config.store_cap {
            let amount = self.store;
            deposit(grid, self.position, amount)?;
            self.store = Decimal::ZERO;
            Some(amount)
        } else {
            None
        };

        Ok(EatOutcome { taken, disgorged })
    }

    /// Euclidean distance to another agent on raw coordinates.
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.position.distance(other.position)
    }

    /// Whether `other` lies within `radius` of this agent.
    ///
    /// Compared on squared values so the test is exact.
    pub fn is_within(&self, other: &Self, radius: Decimal) -> bool {
        let squared = Decimal::from(self.position.squared_distance(other.position));
        radius
            .checked_mul(radius)
            .is_none_or(|radius_squared| squared <= radius_squared)
    }

    /// Average stores with `other` if both are alive and within `radius`.
    ///
    /// Both stores become the mean of the two values read before either is
    /// written. Returns whether the pair shared.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ArithmeticOverflow`] if the sum overflows.
    pub fn share_with(&mut self, other: &mut Self, radius: Decimal) -> Result<bool, AgentError> {
        if !self.is_alive() || !other.is_alive() || self.id == other.id {
            return Ok(false);
        }
        if !self.is_within(other, radius) {
            return Ok(false);
        }

        let average = self
            .store
            .checked_add(other.store)
            .and_then(|sum| sum.checked_div(Decimal::TWO))
            .ok_or_else(|| AgentError::ArithmeticOverflow {
                context: format!("average of agents {} and {}", self.id, other.id),
            })?;
        self.store = average;
        other.store = average;
        Ok(true)
    }

    /// Point-in-time view of this agent.
    pub const fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id: self.id,
            position: self.position,
            store: self.store,
            moves: self.moves,
            liveness: self.liveness,
            colour: self.colour,
        }
    }

    const fn ensure_alive(&self) -> Result<(), AgentError> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(AgentError::AgentDead(self.id))
        }
    }
}

impl core::fmt::Display for Agent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Agent {}: {}, moves={}, store={}, alive={}.",
            self.id,
            self.position,
            self.moves,
            self.store.normalize(),
            self.liveness
        )
    }
}

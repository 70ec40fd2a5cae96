//! The round cycle: one full pass over every agent and every wolf.
//!
//! Each round runs these phases in order:
//!
//! 1. **Shuffle** -- the agents, then the wolves, are put into a fresh
//!    random order.
//!
//! 2. **Forage** -- each live agent, in shuffled order, steps one cell
//!    diagonally, eats from its new cell, and (when there is more than one
//!    agent) shares its store with every live neighbour within the radius.
//!
//! 3. **Hunt** -- each wolf, in shuffled order, strides three cells and
//!    kills every live agent on its new cell.
//!
//! Random draws happen in exactly that order (shuffle agents, shuffle
//! wolves, agent steps, wolf strides), so a round is deterministic given
//! the state and the generator.

use pasture_agents::{AgentError, ForagingConfig, KillRecord, Population};
use pasture_world::{Grid, WorldError};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

/// Errors that can occur during a round.
#[derive(Debug, thiserror::Error)]
pub enum RoundError {
    /// An agent or wolf operation failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// A grid operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

/// Everything a round reads and mutates.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// The resource grid.
    pub grid: Grid,
    /// Every agent and wolf.
    pub population: Population,
    /// Eating parameters.
    pub foraging: ForagingConfig,
    /// Sharing radius.
    pub radius: Decimal,
    /// Number of rounds completed so far.
    pub round: u64,
}

impl SimulationState {
    /// Bundle a grid and population for a run starting at round zero.
    pub const fn new(grid: Grid, population: Population, foraging: ForagingConfig, radius: Decimal) -> Self {
        Self {
            grid,
            population,
            foraging,
            radius,
            round: 0,
        }
    }

    /// Whether the wolves have accounted for every agent.
    ///
    /// Compares the sum of every wolf's cumulative kills against the total
    /// number of agents, so a population with no agents is extinct from the
    /// start.
    pub fn is_extinct(&self) -> bool {
        let agent_count = u64::try_from(self.population.agent_count()).unwrap_or(u64::MAX);
        self.population.total_kills() >= agent_count
    }
}

/// Summary of a single round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    /// The 1-based round number that was executed.
    pub round: u64,
    /// Live agents at the end of the round.
    pub agents_alive: usize,
    /// Kills made this round, in the order they happened.
    pub kills: Vec<KillRecord>,
    /// Sum of every wolf's cumulative kills after this round.
    pub total_kills: u64,
    /// Sum of every grid cell after this round.
    pub grid_total: Decimal,
    /// Sum of every agent store after this round.
    pub store_total: Decimal,
}

/// Run one round against `state`.
///
/// # Errors
///
/// Returns [`RoundError`] if a grid access or store computation fails.
pub fn run_round<R: Rng>(state: &mut SimulationState, rng: &mut R) -> Result<RoundSummary, RoundError> {
    let round = state.round.saturating_add(1);

    state.population.shuffle(rng);
    forage(state, rng)?;
    let kills = hunt(&mut state.population, rng)?;

    state.round = round;
    let summary = RoundSummary {
        round,
        agents_alive: state.population.agents_alive(),
        kills,
        total_kills: state.population.total_kills(),
        grid_total: state.grid.total()?,
        store_total: state.population.total_store()?,
    };

    debug!(
        round = summary.round,
        alive = summary.agents_alive,
        kills = summary.kills.len(),
        total_kills = summary.total_kills,
        grid_total = %summary.grid_total,
        "Round complete"
    );
    Ok(summary)
}

/// Step, eat, and share for every live agent in current order.
fn forage<R: Rng>(state: &mut SimulationState, rng: &mut R) -> Result<(), RoundError> {
    let agent_count = state.population.agent_count();
    let sharing = agent_count > 1;

    for slot in 0..agent_count {
        let Some(agent) = state.population.agents_mut().get_mut(slot) else {
            continue;
        };
        if !agent.is_alive() {
            continue;
        }
        agent.step(rng)?;
        agent.eat(&mut state.grid, &state.foraging)?;

        if sharing {
            state.population.share_with_neighbours(slot, state.radius)?;
        }
    }
    Ok(())
}

/// Stride and hunt for every wolf in current order.
fn hunt<R: Rng>(population: &mut Population, rng: &mut R) -> Result<Vec<KillRecord>, RoundError> {
    let mut kills = Vec::new();
    for slot in 0..population.wolf_count() {
        let Some(wolf) = population.wolves_mut().get_mut(slot) else {
            continue;
        };
        wolf.step(rng);
        kills.extend(population.hunt(slot)?);
    }
    Ok(kills)
}

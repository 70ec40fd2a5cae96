//! Simulation loop runner.
//!
//! This module provides [`run_simulation`], which drives the round loop
//! with:
//!
//! - **Bounded simulation**: stop after a fixed number of rounds
//! - **Early termination**: stop as soon as every agent has been killed
//! - **Conservation audit**: compare grid plus stores against the starting
//!   total after every round and report any drift
//! - **Observer callback**: a [`RoundObserver`] sees each round's summary
//!
//! The runner wraps the single-round [`run_round`] function and adds the
//! bookkeeping around it.
//!
//! [`run_round`]: crate::round::run_round

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::conservation::{ConservationResult, ResourceAnomaly, ResourceBalance, verify_conservation};
use crate::round::{self, RoundError, RoundSummary, SimulationState};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A round failed.
    #[error("round error: {source}")]
    Round {
        /// The underlying round error.
        #[from]
        source: RoundError,
    },

    /// The starting resource total could not be computed.
    #[error("starting resource total overflowed")]
    BalanceOverflow,
}

/// Why a simulation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEndReason {
    /// Every requested round ran.
    RoundLimitReached,
    /// The wolves killed every agent.
    Extinction,
}

impl core::fmt::Display for SimulationEndReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RoundLimitReached => write!(f, "round limit reached"),
            Self::Extinction => write!(f, "extinction"),
        }
    }
}

/// Result of the simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last round summary, if any round ran.
    pub final_summary: Option<RoundSummary>,
    /// Number of rounds executed.
    pub rounds_run: u64,
    /// Number of rounds whose conservation audit failed.
    pub anomalies: u64,
}

/// Callback invoked after each round completes.
pub trait RoundObserver {
    /// Called after a round completes successfully.
    fn on_round(&mut self, summary: &RoundSummary, state: &SimulationState);

    /// Called when a round fails the conservation audit.
    fn on_anomaly(&mut self, _anomaly: &ResourceAnomaly) {}
}

/// A no-op observer for testing.
pub struct NoOpObserver;

impl RoundObserver for NoOpObserver {
    fn on_round(&mut self, _summary: &RoundSummary, _state: &SimulationState) {}
}

/// The generator a run draws every random value from.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Run up to `max_rounds` rounds against `state`.
///
/// Stops before the first round if there is nothing left to hunt, and after
/// any round that leaves every agent dead.
///
/// # Errors
///
/// Returns [`RunnerError`] if a round fails or the starting resource total
/// overflows.
pub fn run_simulation<R: Rng>(
    state: &mut SimulationState,
    max_rounds: u64,
    rng: &mut R,
    observer: &mut dyn RoundObserver,
) -> Result<SimulationResult, RunnerError> {
    let starting_balance =
        ResourceBalance::measure(&state.grid, &state.population).ok_or(RunnerError::BalanceOverflow)?;
    let mut final_summary: Option<RoundSummary> = None;
    let mut rounds_run: u64 = 0;
    let mut anomalies: u64 = 0;

    info!(
        max_rounds,
        agents = state.population.agent_count(),
        wolves = state.population.wolf_count(),
        grid_total = %starting_balance.grid_total,
        "Simulation starting"
    );

    if state.is_extinct() {
        info!("No agents to simulate");
        return Ok(SimulationResult {
            end_reason: SimulationEndReason::Extinction,
            final_summary,
            rounds_run,
            anomalies,
        });
    }

    while rounds_run < max_rounds {
        let summary = round::run_round(state, rng)?;
        rounds_run = rounds_run.saturating_add(1);

        let balance = ResourceBalance {
            grid_total: summary.grid_total,
            store_total: summary.store_total,
        };
        if let ConservationResult::Anomaly(anomaly) = verify_conservation(summary.round, starting_balance, balance) {
            warn!(round = anomaly.round, "{anomaly}");
            anomalies = anomalies.saturating_add(1);
            observer.on_anomaly(&anomaly);
        }

        observer.on_round(&summary, state);

        if state.is_extinct() {
            info!(round = summary.round, "All agents dead -- extinction");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::Extinction,
                final_summary: Some(summary),
                rounds_run,
                anomalies,
            });
        }
        final_summary = Some(summary);
    }

    Ok(SimulationResult {
        end_reason: SimulationEndReason::RoundLimitReached,
        final_summary,
        rounds_run,
        anomalies,
    })
}

/// Log the end of a run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = %result.end_reason,
        rounds_run = result.rounds_run,
        final_agents_alive = result.final_summary.as_ref().map(|s| s.agents_alive),
        total_kills = result.final_summary.as_ref().map(|s| s.total_kills),
        anomalies = result.anomalies,
        "Simulation ended"
    );
}

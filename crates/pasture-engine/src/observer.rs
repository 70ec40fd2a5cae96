//! Round observer that reports progress through the log.
//!
//! Logs a progress line at a fixed round interval and whenever wolves make
//! kills, a debug line per kill, and escalates conservation anomalies to
//! `error`.

use pasture_core::conservation::ResourceAnomaly;
use pasture_core::round::{RoundSummary, SimulationState};
use pasture_core::runner::RoundObserver;
use tracing::{debug, error, info};

/// Observer that logs run progress.
#[derive(Debug)]
pub struct ProgressObserver {
    interval: u64,
    rounds_seen: u64,
    kills_seen: u64,
    top_wolf_kills: u32,
    anomalies_seen: u64,
}

impl ProgressObserver {
    /// Log a progress line roughly ten times over `max_rounds` rounds.
    pub fn new(max_rounds: u64) -> Self {
        Self {
            interval: (max_rounds / 10).max(1),
            rounds_seen: 0,
            kills_seen: 0,
            top_wolf_kills: 0,
            anomalies_seen: 0,
        }
    }

    /// Rounds observed so far.
    pub const fn rounds_seen(&self) -> u64 {
        self.rounds_seen
    }

    /// Kills observed so far.
    pub const fn kills_seen(&self) -> u64 {
        self.kills_seen
    }

    /// Highest kill count reached by a single wolf.
    pub const fn top_wolf_kills(&self) -> u32 {
        self.top_wolf_kills
    }

    /// Conservation anomalies observed so far.
    pub const fn anomalies_seen(&self) -> u64 {
        self.anomalies_seen
    }
}

impl RoundObserver for ProgressObserver {
    fn on_round(&mut self, summary: &RoundSummary, state: &SimulationState) {
        self.rounds_seen = self.rounds_seen.saturating_add(1);
        let kills = u64::try_from(summary.kills.len()).unwrap_or(u64::MAX);
        self.kills_seen = self.kills_seen.saturating_add(kills);

        for kill in &summary.kills {
            let wolf_kills = state.population.wolf(kill.wolf).map_or(0, |w| w.kills);
            self.top_wolf_kills = self.top_wolf_kills.max(wolf_kills);
            debug!(
                round = summary.round,
                wolf = %kill.wolf,
                wolf_kills,
                agent = %kill.agent,
                agent_moves = state.population.agent(kill.agent).map_or(0, |a| a.moves),
                position = %kill.position,
                "Kill"
            );
        }

        if kills > 0 || summary.round.checked_rem(self.interval) == Some(0) {
            info!(
                round = summary.round,
                alive = summary.agents_alive,
                agents = state.population.agent_count(),
                kills_this_round = kills,
                total_kills = summary.total_kills,
                grid_total = %summary.grid_total.round_dp(2),
                "Progress"
            );
        }
    }

    fn on_anomaly(&mut self, anomaly: &ResourceAnomaly) {
        self.anomalies_seen = self.anomalies_seen.saturating_add(1);
        error!(
            round = anomaly.round,
            expected_grid = %anomaly.expected.grid_total,
            expected_stores = %anomaly.expected.store_total,
            actual_grid = %anomaly.actual.grid_total,
            actual_stores = %anomaly.actual.store_total,
            "Resource conservation violated"
        );
    }
}

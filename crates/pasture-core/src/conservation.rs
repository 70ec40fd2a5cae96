//! Resource conservation audit.
//!
//! The simulation has no sources and no sinks: eating moves resource from a
//! cell to a store, disgorging moves it back, and sharing moves it between
//! stores. So for every round:
//!
//! ```text
//! grid_total + store_total == initial grid_total + initial store_total
//! ```
//!
//! Quantities are exact decimals, but halving an odd store at the last of
//! 28 significant digits rounds, so the comparison allows a tiny tolerance.
//! A violation produces a [`ResourceAnomaly`].

use pasture_agents::Population;
use pasture_world::Grid;
use rust_decimal::Decimal;

/// Largest drift accepted as rounding rather than a leak.
pub const CONSERVATION_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 12);

/// Where the resource currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceBalance {
    /// Sum of every grid cell.
    pub grid_total: Decimal,
    /// Sum of every agent store, dead agents included.
    pub store_total: Decimal,
}

impl ResourceBalance {
    /// Measure the balance of a grid and population.
    ///
    /// Returns `None` if either sum overflows.
    pub fn measure(grid: &Grid, population: &Population) -> Option<Self> {
        Some(Self {
            grid_total: grid.total().ok()?,
            store_total: population.total_store().ok()?,
        })
    }

    /// Grid plus stores. Returns `None` on overflow.
    pub fn total(&self) -> Option<Decimal> {
        self.grid_total.checked_add(self.store_total)
    }
}

/// Details of a failed conservation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAnomaly {
    /// Round after which the anomaly was found.
    pub round: u64,
    /// Balance at the start of the run.
    pub expected: ResourceBalance,
    /// Balance now.
    pub actual: ResourceBalance,
    /// Human-readable description.
    pub message: String,
}

impl core::fmt::Display for ResourceAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// The result of a conservation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConservationResult {
    /// Totals match within tolerance.
    Balanced,
    /// Resource was created or destroyed.
    Anomaly(ResourceAnomaly),
}

/// Compare the current balance against the starting one.
pub fn verify_conservation(round: u64, expected: ResourceBalance, actual: ResourceBalance) -> ConservationResult {
    let (Some(expected_total), Some(actual_total)) = (expected.total(), actual.total()) else {
        return ConservationResult::Anomaly(ResourceAnomaly {
            round,
            expected,
            actual,
            message: format!("RESOURCE_ANOMALY after round {round}: arithmetic overflow while summing totals"),
        });
    };

    let drift = actual_total
        .checked_sub(expected_total)
        .map(|d| d.abs())
        .unwrap_or(Decimal::MAX);
    if drift <= CONSERVATION_TOLERANCE {
        ConservationResult::Balanced
    } else {
        ConservationResult::Anomaly(ResourceAnomaly {
            round,
            expected,
            actual,
            message: format!(
                "RESOURCE_ANOMALY after round {round}: total {actual_total} differs from starting total {expected_total}",
            ),
        })
    }
}

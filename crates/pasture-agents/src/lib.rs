//! Forager and wolf state, behaviours, and the population registry for the
//! Pasture simulation.
//!
//! This crate contains the logic layer for entities -- everything that
//! operates on agent and wolf state without touching I/O. It sits between
//! `pasture-world` (the grid) and `pasture-core` (the round cycle).
//!
//! # Modules
//!
//! - [`agent`] -- Foragers: stepping, eating, and pairwise sharing ([`Agent`])
//! - [`config`] -- Foraging parameters ([`ForagingConfig`])
//! - [`error`] -- Error types for all entity operations ([`AgentError`])
//! - [`population`] -- The registry that owns every entity ([`Population`])
//! - [`wolf`] -- Predators: stepping and hunting ([`Wolf`], [`KillRecord`])

pub mod agent;
pub mod config;
pub mod error;
pub mod population;
pub mod wolf;

// Re-export primary types at crate root for convenience.
pub use agent::{Agent, EatOutcome};
pub use config::ForagingConfig;
pub use error::AgentError;
pub use population::{MAX_START_LOCATIONS, Population, PopulationParams};
pub use wolf::{KillRecord, WOLF_STRIDE, Wolf};

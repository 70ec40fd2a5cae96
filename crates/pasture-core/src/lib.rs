//! Configuration, round cycle, and orchestration for the Pasture simulation.
//!
//! This crate owns the round cycle that drives the simulation: shuffle,
//! forage, and hunt, repeated until the round limit or extinction.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `pasture.yaml` into
//!   strongly-typed structs, with validation and environment overrides.
//! - [`conservation`] -- Resource conservation audit.
//! - [`round`] -- The single-round cycle and [`SimulationState`].
//! - [`runner`] -- The bounded round loop with [`RoundObserver`] callbacks.
//!
//! [`SimulationState`]: round::SimulationState
//! [`RoundObserver`]: runner::RoundObserver

pub mod config;
pub mod conservation;
pub mod round;
pub mod runner;

//! Shared type definitions for the Pasture simulation.
//!
//! This crate is the single source of truth for the small vocabulary shared
//! by the world, agent, core, and engine crates.
//!
//! # Modules
//!
//! - [`ids`] -- Dense, 1-based identifiers for agents and wolves
//! - [`enums`] -- Liveness and wolf heading enumerations
//! - [`structs`] -- Positions, colours, and entity snapshots

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Heading, Liveness};
pub use ids::{AgentId, WolfId};
pub use structs::{AgentSnapshot, Colour, ColourParseError, PopulationSnapshot, Position, WolfSnapshot};

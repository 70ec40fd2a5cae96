//! Error types for the pasture-agents crate.
//!
//! All operations that can fail return typed errors rather than panicking.

use pasture_types::{AgentId, Position};
use pasture_world::WorldError;

/// Errors that can occur during agent and wolf operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A behaviour was invoked on an agent that has been killed.
    ///
    /// Dead agents are frozen: their position and store never change again.
    #[error("agent {0} is dead")]
    AgentDead(AgentId),

    /// A supplied start location lies outside the grid.
    #[error("start location {position} is outside the grid (y <= {y_bound}, x <= {x_bound})")]
    StartOutOfBounds {
        /// The rejected position.
        position: Position,
        /// Largest valid `y`.
        y_bound: u32,
        /// Largest valid `x`.
        x_bound: u32,
    },

    /// A registry slot index was past the end of the collection.
    #[error("slot {slot} is out of range for {len} entries")]
    SlotOutOfRange {
        /// The requested slot.
        slot: usize,
        /// Number of entries in the collection.
        len: usize,
    },

    /// No more identifiers can be handed out.
    #[error("identifier space exhausted")]
    IdExhausted,

    /// An arithmetic overflow occurred in a store computation.
    #[error("arithmetic overflow in store computation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// A grid access failed.
    #[error("world error: {source}")]
    World {
        /// The underlying grid error.
        #[from]
        source: WorldError,
    },
}

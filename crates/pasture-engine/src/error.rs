//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup, the run, and output.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: pasture_core::config::ConfigError,
    },

    /// The input raster could not be loaded.
    #[error("raster error: {source}")]
    Raster {
        /// The underlying raster error.
        #[from]
        source: pasture_world::RasterError,
    },

    /// A grid-wide computation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: pasture_world::WorldError,
    },

    /// Default start locations could not be loaded.
    #[error("start location error: {source}")]
    StartLocations {
        /// The underlying start location error.
        #[from]
        source: crate::start_locations::StartLocationError,
    },

    /// Population spawning failed.
    #[error("spawn error: {source}")]
    Spawn {
        /// The underlying agent error.
        #[from]
        source: pasture_agents::AgentError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: pasture_core::runner::RunnerError,
    },

    /// Output files could not be written.
    #[error("export error: {source}")]
    Export {
        /// The underlying export error.
        #[from]
        source: crate::export::ExportError,
    },
}

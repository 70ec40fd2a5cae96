//! Resource grid, toroidal geometry, and raster loading for the Pasture
//! simulation.
//!
//! This crate models the physical world: a fixed-shape rectangular field of
//! resource quantities whose edges wrap around to the opposite side.
//!
//! # Modules
//!
//! - [`error`] -- Error types for grid access and raster loading.
//! - [`grid`] -- [`Grid`], the bounds-checked 2-D resource field.
//! - [`raster`] -- Parsing comma-delimited raster text into a [`Grid`].
//! - [`resource`] -- Harvesting from and depositing into grid cells.
//! - [`torus`] -- Wraparound coordinate arithmetic.

pub mod error;
pub mod grid;
pub mod raster;
pub mod resource;
pub mod torus;

// Re-export primary types at crate root.
pub use error::{RasterError, WorldError};
pub use grid::Grid;
pub use raster::{load_raster, parse_raster};
pub use resource::{deposit, harvest};
pub use torus::wrap_step;

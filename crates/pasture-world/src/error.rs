//! Error types for the `pasture-world` crate.
//!
//! Grid access returns [`WorldError`]; loading a raster from text returns
//! [`RasterError`], which reports the offending row and column in 1-based
//! terms so the message can be matched against the input file.

use pasture_types::Position;
use rust_decimal::Decimal;

/// Errors that can occur during grid operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A read or write addressed a cell outside the grid.
    #[error("cell {position} is outside the {height}x{width} grid")]
    CellOutOfBounds {
        /// The requested cell.
        position: Position,
        /// Grid height (rows).
        height: usize,
        /// Grid width (columns).
        width: usize,
    },

    /// A write would make a cell negative.
    #[error("cell {position} cannot hold negative quantity {value}")]
    NegativeCell {
        /// The cell being written.
        position: Position,
        /// The rejected value.
        value: Decimal,
    },

    /// The grid has no rows or no columns.
    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    /// The rows passed to the grid constructor differ in length.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        /// 1-based index of the first mismatching row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the mismatching row.
        found: usize,
    },

    /// The grid is wider or taller than a coordinate can address.
    #[error("grid dimension {0} exceeds the addressable range")]
    TooLarge(usize),

    /// Arithmetic overflow in a resource quantity.
    #[error("arithmetic overflow in grid calculation")]
    ArithmeticOverflow,
}

/// Errors that can occur while loading a raster file.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// Failed to read the raster file from disk.
    #[error("failed to read raster file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A cell could not be parsed as a number.
    #[error("non numerical cell value {value:?} at row {row}, column {column} of input raster")]
    NonNumeric {
        /// 1-based row number.
        row: usize,
        /// 1-based column number.
        column: usize,
        /// The raw cell text.
        value: String,
    },

    /// A row's cell count differs from the first row's.
    #[error("inconsistent number of cells in row {row} of input raster: expected {expected}, found {found}")]
    InconsistentRow {
        /// 1-based row number.
        row: usize,
        /// Cell count of the first row.
        expected: usize,
        /// Cell count of this row.
        found: usize,
    },

    /// A cell holds a negative quantity.
    #[error("negative cell value {value} at row {row}, column {column} of input raster")]
    NegativeCell {
        /// 1-based row number.
        row: usize,
        /// 1-based column number.
        column: usize,
        /// The parsed value.
        value: Decimal,
    },

    /// The raster contained no rows.
    #[error("input raster is empty")]
    Empty,

    /// The parsed rows were rejected by the grid constructor.
    #[error("invalid raster: {source}")]
    World {
        /// The underlying grid error.
        #[from]
        source: WorldError,
    },
}

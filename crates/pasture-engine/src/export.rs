//! Output files written after a run.
//!
//! - `out1.txt` -- the final grid, cells rounded to whole units, one
//!   comma-separated row per line. Overwritten every run.
//! - `out2.txt` -- one line appended per run: every agent's store rounded
//!   to two decimal places, in agent-number order.
//! - `out3.txt` -- one line appended per run: every wolf's kill count, in
//!   wolf-number order.
//! - `snapshot.json` -- run metadata plus the start and finish state of
//!   every entity, for renderers.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use pasture_core::runner::SimulationResult;
use pasture_types::PopulationSnapshot;
use pasture_world::Grid;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// Final grid file name.
pub const GRID_FILE: &str = "out1.txt";
/// Agent stores file name.
pub const STORES_FILE: &str = "out2.txt";
/// Wolf kills file name.
pub const KILLS_FILE: &str = "out3.txt";
/// Snapshot file name.
pub const SNAPSHOT_FILE: &str = "snapshot.json";

/// Errors that can occur while writing output.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// A file could not be created or written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The grid summary could not be computed.
    #[error("failed to summarize grid: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: pasture_world::WorldError,
    },

    /// The snapshot could not be serialized.
    #[error("failed to serialize snapshot: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Everything a renderer needs to draw a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSnapshot {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the snapshot was written.
    pub created_at: DateTime<Utc>,
    /// Seed the run was generated from.
    pub seed: u64,
    /// Rounds actually executed.
    pub rounds_run: u64,
    /// Why the run stopped.
    pub end_reason: String,
    /// Grid shape and final total.
    pub grid: GridSummary,
    /// Entity state before the first round, when it was recorded.
    pub start: Option<PopulationSnapshot>,
    /// Entity state after the last round.
    pub finish: PopulationSnapshot,
}

/// Shape and content summary of the final grid.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GridSummary {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
    /// Sum of every cell.
    pub total: Decimal,
}

impl RunSnapshot {
    /// Assemble a snapshot for a finished run.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::World`] if the grid total overflows.
    pub fn new(
        seed: u64,
        result: &SimulationResult,
        grid: &Grid,
        start: Option<PopulationSnapshot>,
        finish: PopulationSnapshot,
    ) -> Result<Self, ExportError> {
        Ok(Self {
            run_id: Uuid::now_v7(),
            created_at: Utc::now(),
            seed,
            rounds_run: result.rounds_run,
            end_reason: result.end_reason.to_string(),
            grid: GridSummary {
                height: grid.height(),
                width: grid.width(),
                total: grid.total()?,
            },
            start,
            finish,
        })
    }
}

/// Render the grid as comma-separated rows of whole numbers.
pub fn format_grid(grid: &Grid) -> String {
    grid.rounded_rows()
        .iter()
        .map(|row| join(row.iter().map(|cell| cell.normalize().to_string())))
        .map(|line| line + "\n")
        .collect()
}

/// Render every agent's store, rounded to two places, as one line.
pub fn format_stores(snapshot: &PopulationSnapshot) -> String {
    join(
        snapshot
            .agents
            .iter()
            .map(|a| a.store.round_dp(2).normalize().to_string()),
    ) + "\n"
}

/// Render every wolf's kill count as one line.
pub fn format_kills(snapshot: &PopulationSnapshot) -> String {
    join(snapshot.wolves.iter().map(|w| w.kills.to_string())) + "\n"
}

/// Write the three text outputs into `directory`.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if a file cannot be written.
pub fn write_outputs(directory: &Path, grid: &Grid, finish: &PopulationSnapshot) -> Result<(), ExportError> {
    let grid_path = directory.join(GRID_FILE);
    std::fs::write(&grid_path, format_grid(grid)).map_err(|source| ExportError::Io {
        path: grid_path.clone(),
        source,
    })?;
    append(&directory.join(STORES_FILE), &format_stores(finish))?;
    append(&directory.join(KILLS_FILE), &format_kills(finish))?;
    info!(directory = %directory.display(), "Output files written");
    Ok(())
}

/// Write `snapshot.json` into `directory`.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or the write fails.
pub fn write_snapshot(directory: &Path, snapshot: &RunSnapshot) -> Result<PathBuf, ExportError> {
    let path = directory.join(SNAPSHOT_FILE);
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(&path, json).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), run_id = %snapshot.run_id, "Snapshot written");
    Ok(path)
}

fn append(path: &Path, line: &str) -> Result<(), ExportError> {
    let to_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_err)?;
    file.write_all(line.as_bytes()).map_err(to_err)
}

fn join(values: impl Iterator<Item = String>) -> String {
    values.collect::<Vec<_>>().join(",")
}

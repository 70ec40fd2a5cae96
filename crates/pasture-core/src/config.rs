//! Configuration loading and typed config structures for the Pasture simulation.
//!
//! Configuration is optional: every field has a default, and a YAML file
//! (conventionally `pasture.yaml` in the working directory) overrides only
//! what it names. The engine binary layers command-line flags on top and
//! then calls [`SimulationConfig::validate`] before anything runs.

use std::path::{Path, PathBuf};

use pasture_agents::ForagingConfig;
use pasture_types::Position;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Environment variable that overrides `world.seed`.
pub const SEED_ENV_VAR: &str = "PASTURE_SEED";

/// Page listing the default agent start locations.
pub const DEFAULT_START_LOCATIONS_URL: &str =
    "http://www.geog.leeds.ac.uk/courses/computing/practicals/python/agent-framework/part9/data.html";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is outside its allowed range.
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Seed and grid source.
    #[serde(default)]
    pub world: WorldConfig,

    /// Population sizes and start locations.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Round count and neighbourhood radius.
    #[serde(default)]
    pub simulation: RoundsConfig,

    /// Bite size and store cap.
    #[serde(default)]
    pub foraging: ForagingConfig,

    /// Console report toggles.
    #[serde(default)]
    pub reporting: ReportingConfig,

    /// Where output files go.
    #[serde(default)]
    pub output: OutputConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `lookup` resolves override variables; the engine passes the process
    /// environment, so `PASTURE_SEED` overrides `world.seed` when set to a
    /// valid integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents, lookup)
    }

    /// Parse configuration from a YAML string, then apply overrides from
    /// `lookup`.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_overrides_from(lookup);
        Ok(config)
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Unparseable values are ignored and the existing value kept.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(seed) = lookup(SEED_ENV_VAR).and_then(|raw| raw.trim().parse::<u64>().ok()) {
            self.world.seed = seed;
        }
    }

    /// Check that every count, radius, and foraging parameter is positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population.num_of_agents == 0 {
            return Err(must_be_positive("population.num_of_agents"));
        }
        if self.population.num_of_wolves == 0 {
            return Err(must_be_positive("population.num_of_wolves"));
        }
        if self.simulation.num_of_iterations == 0 {
            return Err(must_be_positive("simulation.num_of_iterations"));
        }
        if self.simulation.neighbourhood_radius <= Decimal::ZERO {
            return Err(must_be_positive("simulation.neighbourhood_radius"));
        }
        if self.foraging.bite_size <= Decimal::ZERO {
            return Err(must_be_positive("foraging.bite_size"));
        }
        if self.foraging.store_cap <= Decimal::ZERO {
            return Err(must_be_positive("foraging.store_cap"));
        }
        Ok(())
    }
}

fn must_be_positive(field: &'static str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: String::from("must be greater than zero"),
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Comma-delimited raster the grid is loaded from.
    #[serde(default = "default_grid_path")]
    pub grid_path: PathBuf,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            grid_path: default_grid_path(),
        }
    }
}

/// Population configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopulationConfig {
    /// Number of foragers.
    #[serde(default = "default_num_of_agents")]
    pub num_of_agents: u32,

    /// Number of wolves in the pack.
    #[serde(default = "default_num_of_wolves")]
    pub num_of_wolves: u32,

    /// Whether the first agents take their start cells from
    /// `start_locations_source`.
    #[serde(default)]
    pub use_default_start_locations: bool,

    /// URL of an HTML page, or path of a `y,x` file, listing start cells.
    #[serde(default = "default_start_locations_source")]
    pub start_locations_source: String,

    /// Start cell for the whole pack as `[y, x]`; random when absent.
    #[serde(default)]
    pub wolf_pack_start: Option<[u32; 2]>,

    /// Start cells for individual wolves as `[y, x]`, in wolf-number order.
    /// A wolf without one joins the first wolf.
    #[serde(default)]
    pub wolf_starts: Vec<[u32; 2]>,
}

impl PopulationConfig {
    /// The pack start as a position, if one was configured.
    pub fn wolf_pack_position(&self) -> Option<Position> {
        self.wolf_pack_start.map(|[y, x]| Position::new(y, x))
    }

    /// The per-wolf start cells as positions.
    pub fn wolf_start_positions(&self) -> Vec<Position> {
        self.wolf_starts.iter().map(|&[y, x]| Position::new(y, x)).collect()
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            num_of_agents: default_num_of_agents(),
            num_of_wolves: default_num_of_wolves(),
            use_default_start_locations: false,
            start_locations_source: default_start_locations_source(),
            wolf_pack_start: None,
            wolf_starts: Vec::new(),
        }
    }
}

/// Round-loop configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoundsConfig {
    /// Number of rounds to run.
    #[serde(default = "default_num_of_iterations")]
    pub num_of_iterations: u64,

    /// Largest distance at which two agents share their stores.
    #[serde(default = "default_neighbourhood_radius")]
    pub neighbourhood_radius: Decimal,
}

impl Default for RoundsConfig {
    fn default() -> Self {
        Self {
            num_of_iterations: default_num_of_iterations(),
            neighbourhood_radius: default_neighbourhood_radius(),
        }
    }
}

/// Console report toggles. None of them affect the simulation itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ReportingConfig {
    /// Print starting positions (and keep them for the snapshot).
    #[serde(default)]
    pub show_start_plot: bool,

    /// Print one line per agent.
    #[serde(default)]
    pub show_agent_summary: bool,

    /// Print one line per wolf.
    #[serde(default)]
    pub show_wolf_summary: bool,

    /// Print the resolved parameters before the run.
    #[serde(default)]
    pub show_params: bool,
}

/// Output file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Directory that receives `out1.txt`, `out2.txt`, `out3.txt` and the
    /// snapshot.
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    /// Whether to write `snapshot.json`.
    #[serde(default = "default_true")]
    pub snapshot: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            snapshot: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    42
}

fn default_grid_path() -> PathBuf {
    PathBuf::from("in.txt")
}

const fn default_num_of_agents() -> u32 {
    10
}

const fn default_num_of_wolves() -> u32 {
    5
}

fn default_start_locations_source() -> String {
    DEFAULT_START_LOCATIONS_URL.to_owned()
}

const fn default_num_of_iterations() -> u64 {
    100
}

fn default_neighbourhood_radius() -> Decimal {
    Decimal::from(20_u32)
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

const fn default_true() -> bool {
    true
}

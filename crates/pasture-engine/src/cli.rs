//! Command-line interface.
//!
//! Every simulation flag is optional; a flag that is given overrides the
//! value from the YAML file, which in turn overrides the built-in default.
//! The flag names follow the classic model runner (`--agents`, `--moves`,
//! `--distance`, ...) and the yes/no toggles accept `Y` or `N`.

use std::path::PathBuf;

use clap::Parser;
use pasture_core::config::SimulationConfig;
use rust_decimal::Decimal;

/// Default configuration file, read when it exists.
pub const DEFAULT_CONFIG_PATH: &str = "pasture.yaml";

/// Forager and wolf-pack simulation on a resource grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "pasture")]
#[command(version)]
#[command(about = "Forager and wolf-pack simulation on a toroidal resource grid")]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of agents
    #[arg(long = "agents", value_parser = clap::value_parser!(u32).range(1..))]
    pub num_of_agents: Option<u32>,

    /// Use default agent start locations (Y/N)
    #[arg(long = "defaults", value_parser = parse_yes_no)]
    pub use_default_start_locations: Option<bool>,

    /// Number of agent and wolf moves
    #[arg(long = "moves", value_parser = clap::value_parser!(u64).range(1..))]
    pub num_of_iterations: Option<u64>,

    /// Distance considered to be a neighbour
    #[arg(long = "distance", value_parser = parse_positive_decimal)]
    pub neighbourhood_radius: Option<Decimal>,

    /// Number of wolves in the pack
    #[arg(long = "wolves", value_parser = clap::value_parser!(u32).range(1..))]
    pub num_of_wolves: Option<u32>,

    /// Show starting locations of agents and wolves (Y/N)
    #[arg(long = "plotstart", value_parser = parse_yes_no)]
    pub show_start_plot: Option<bool>,

    /// Display agent summary data (Y/N)
    #[arg(long = "dispagents", value_parser = parse_yes_no)]
    pub show_agent_summary: Option<bool>,

    /// Display wolf summary data (Y/N)
    #[arg(long = "dispwolves", value_parser = parse_yes_no)]
    pub show_wolf_summary: Option<bool>,

    /// Display parameter data (Y/N)
    #[arg(long = "dispparams", value_parser = parse_yes_no)]
    pub show_params: Option<bool>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Input raster file
    #[arg(long)]
    pub grid: Option<PathBuf>,

    /// URL or file listing default start locations
    #[arg(long)]
    pub start_locations: Option<String>,

    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

impl Cli {
    /// Overlay every flag that was given onto `config`.
    pub fn apply(&self, config: &mut SimulationConfig) {
        if let Some(v) = self.num_of_agents {
            config.population.num_of_agents = v;
        }
        if let Some(v) = self.use_default_start_locations {
            config.population.use_default_start_locations = v;
        }
        if let Some(v) = self.num_of_iterations {
            config.simulation.num_of_iterations = v;
        }
        if let Some(v) = self.neighbourhood_radius {
            config.simulation.neighbourhood_radius = v;
        }
        if let Some(v) = self.num_of_wolves {
            config.population.num_of_wolves = v;
        }
        if let Some(v) = self.show_start_plot {
            config.reporting.show_start_plot = v;
        }
        if let Some(v) = self.show_agent_summary {
            config.reporting.show_agent_summary = v;
        }
        if let Some(v) = self.show_wolf_summary {
            config.reporting.show_wolf_summary = v;
        }
        if let Some(v) = self.show_params {
            config.reporting.show_params = v;
        }
        if let Some(v) = self.seed {
            config.world.seed = v;
        }
        if let Some(v) = &self.grid {
            config.world.grid_path.clone_from(v);
        }
        if let Some(v) = &self.start_locations {
            config.population.start_locations_source.clone_from(v);
        }
        if let Some(v) = &self.output_dir {
            config.output.directory.clone_from(v);
        }
    }
}

/// Parse a `Y`/`N` toggle, case-insensitively.
fn parse_yes_no(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "Y" | "YES" => Ok(true),
        "N" | "NO" => Ok(false),
        _ => Err(format!("{raw} - must be Y or N")),
    }
}

/// Parse a number greater than zero.
fn parse_positive_decimal(raw: &str) -> Result<Decimal, String> {
    let value: Decimal = raw
        .trim()
        .parse()
        .map_err(|_parse_err| format!("{raw} - must be a number and > 0"))?;
    if value <= Decimal::ZERO {
        return Err(format!("{raw} - must be a number and > 0"));
    }
    Ok(value)
}

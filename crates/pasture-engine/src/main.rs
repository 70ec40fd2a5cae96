//! Engine binary for the Pasture simulation.
//!
//! This is the main entry point that wires together configuration, the
//! input raster, the population, and the round loop. It loads
//! configuration, builds the initial state, runs the simulation until the
//! round limit or extinction, and writes the output files.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Parse command-line flags and load `pasture.yaml`
//! 3. Load the input raster into a grid
//! 4. Fetch default start locations, if requested
//! 5. Spawn agents and the wolf pack from the configured seed
//! 6. Run the simulation loop
//! 7. Print reports and write output files

mod cli;
mod error;
mod export;
mod observer;
mod report;
mod start_locations;

use std::path::Path;

use anyhow::Context as _;
use clap::Parser as _;
use pasture_agents::{Population, PopulationParams};
use pasture_core::config::SimulationConfig;
use pasture_core::round::SimulationState;
use pasture_core::runner;
use pasture_types::Position;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, DEFAULT_CONFIG_PATH};
use crate::error::EngineError;
use crate::export::RunSnapshot;
use crate::observer::ProgressObserver;
use crate::start_locations::StartLocationError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step, the simulation itself, or
/// writing the output fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();
    info!("pasture starting");

    run(&cli).await.context("pasture run failed")
}

/// Run one simulation end to end.
async fn run(cli: &Cli) -> Result<(), EngineError> {
    // 2. Load configuration.
    let config = load_config(cli, |key| std::env::var(key).ok())?;
    info!(
        seed = config.world.seed,
        grid_path = %config.world.grid_path.display(),
        agents = config.population.num_of_agents,
        wolves = config.population.num_of_wolves,
        rounds = config.simulation.num_of_iterations,
        radius = %config.simulation.neighbourhood_radius,
        "Configuration loaded"
    );
    if config.reporting.show_params {
        println!("{}", report::params_block(&config));
    }

    // 3. Load the grid.
    let grid = pasture_world::load_raster(&config.world.grid_path)?;
    let total = grid.total()?;
    info!(
        height = grid.height(),
        width = grid.width(),
        total = %total,
        "Grid loaded"
    );

    // 4. Default start locations.
    let start_locations = if config.population.use_default_start_locations {
        fetch_start_locations(&config.population.start_locations_source).await?
    } else {
        Vec::new()
    };

    // 5. Spawn the population.
    let mut rng = runner::seeded_rng(config.world.seed);
    let params = PopulationParams {
        num_agents: config.population.num_of_agents,
        num_wolves: config.population.num_of_wolves,
        start_locations,
        wolf_pack_start: config.population.wolf_pack_position(),
        wolf_starts: config.population.wolf_start_positions(),
    };
    let population = Population::spawn(&params, grid.y_bound(), grid.x_bound(), &mut rng)?;

    let reporting = config.reporting;
    let start = reporting.show_start_plot.then(|| {
        for line in report::population_lines(
            "Start",
            &population,
            reporting.show_agent_summary,
            reporting.show_wolf_summary,
        ) {
            println!("{line}");
        }
        population.snapshot()
    });

    // 6. Run the simulation.
    let mut state = SimulationState::new(
        grid,
        population,
        config.foraging.clone(),
        config.simulation.neighbourhood_radius,
    );
    let mut observer = ProgressObserver::new(config.simulation.num_of_iterations);
    let result = runner::run_simulation(
        &mut state,
        config.simulation.num_of_iterations,
        &mut rng,
        &mut observer,
    )?;
    runner::log_simulation_end(&result);

    // 7. Reports and output.
    for line in report::population_lines(
        "Finish",
        &state.population,
        reporting.show_agent_summary,
        reporting.show_wolf_summary,
    ) {
        println!("{line}");
    }

    let directory = &config.output.directory;
    std::fs::create_dir_all(directory).map_err(|source| export::ExportError::Io {
        path: directory.clone(),
        source,
    })?;
    let finish = state.population.snapshot();
    export::write_outputs(directory, &state.grid, &finish)?;
    if config.output.snapshot {
        let snapshot = RunSnapshot::new(config.world.seed, &result, &state.grid, start, finish)?;
        export::write_snapshot(directory, &snapshot)?;
    }

    info!(
        end_reason = %result.end_reason,
        rounds_observed = observer.rounds_seen(),
        kills_observed = observer.kills_seen(),
        top_wolf_kills = observer.top_wolf_kills(),
        anomalies = observer.anomalies_seen(),
        "pasture shutdown complete"
    );
    Ok(())
}

/// Resolve configuration: defaults, then the YAML file, then the
/// variables resolved by `lookup` (`PASTURE_SEED`), then flags.
///
/// An explicitly named config file must exist; the default
/// `pasture.yaml` is used only when present.
fn load_config(
    cli: &Cli,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SimulationConfig, EngineError> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_file(path, lookup)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                SimulationConfig::from_file(default_path, lookup)?
            } else {
                info!("Config file not found, using defaults");
                let mut config = SimulationConfig::default();
                config.apply_overrides_from(lookup);
                config
            }
        }
    };
    cli.apply(&mut config);
    config.validate()?;
    Ok(config)
}

/// Load default start locations.
///
/// An unreachable page falls back to random placement; a local file that
/// cannot be read or parsed is an error.
async fn fetch_start_locations(source: &str) -> Result<Vec<Position>, EngineError> {
    match start_locations::load(source).await {
        Ok(locations) => {
            if locations.is_empty() {
                warn!(source, "No start locations found; all agents start at random");
            }
            Ok(locations)
        }
        Err(e @ StartLocationError::Http { .. }) => {
            warn!(source, error = %e, "Start locations unavailable; all agents start at random");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

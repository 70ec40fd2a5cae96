//! End-to-end tests for the `pasture-core` round loop.
//!
//! Each test builds a grid, spawns a population from a seed, and drives the
//! runner the way the engine binary does.

// Integration tests use unwrap/indexing extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use pasture_agents::{ForagingConfig, Population, PopulationParams};
use pasture_core::config::SimulationConfig;
use pasture_core::conservation::CONSERVATION_TOLERANCE;
use pasture_core::round::SimulationState;
use pasture_core::runner::{NoOpObserver, SimulationEndReason, run_simulation, seeded_rng};
use pasture_types::{Liveness, Position};
use pasture_world::{Grid, parse_raster};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A 20x30 raster with uneven cell values.
fn sample_grid() -> Grid {
    let text: String = (0..20_u32)
        .map(|y| {
            (0..30_u32)
                .map(|x| ((y * 7 + x * 13) % 40).to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n");
    parse_raster(&text).unwrap()
}

fn build_state(seed: u64, params: &PopulationParams, grid: Grid) -> (SimulationState, rand::rngs::StdRng) {
    let mut rng = seeded_rng(seed);
    let population = Population::spawn(params, grid.y_bound(), grid.x_bound(), &mut rng).unwrap();
    let state = SimulationState::new(grid, population, ForagingConfig::default(), dec!(20));
    (state, rng)
}

fn params(num_agents: u32, num_wolves: u32) -> PopulationParams {
    PopulationParams {
        num_agents,
        num_wolves,
        ..PopulationParams::default()
    }
}

#[test]
fn same_seed_same_outcome() {
    let run = || {
        let (mut state, mut rng) = build_state(42, &params(10, 5), sample_grid());
        let result = run_simulation(&mut state, 100, &mut rng, &mut NoOpObserver).unwrap();
        (result, state.population.snapshot(), state.grid)
    };
    let (result_a, snapshot_a, grid_a) = run();
    let (result_b, snapshot_b, grid_b) = run();
    assert_eq!(result_a, result_b);
    assert_eq!(snapshot_a, snapshot_b);
    assert_eq!(grid_a, grid_b);
}

#[test]
fn different_seeds_diverge() {
    let (mut a, mut rng_a) = build_state(1, &params(10, 0), sample_grid());
    let (mut b, mut rng_b) = build_state(2, &params(10, 0), sample_grid());
    run_simulation(&mut a, 10, &mut rng_a, &mut NoOpObserver).unwrap();
    run_simulation(&mut b, 10, &mut rng_b, &mut NoOpObserver).unwrap();
    assert_ne!(a.population.snapshot(), b.population.snapshot());
}

#[test]
fn resource_is_conserved_over_a_full_run() {
    let (mut state, mut rng) = build_state(7, &params(25, 3), sample_grid());
    let before = state.grid.total().unwrap();

    let result = run_simulation(&mut state, 200, &mut rng, &mut NoOpObserver).unwrap();
    assert_eq!(result.anomalies, 0);

    let after = state.grid.total().unwrap() + state.population.total_store().unwrap();
    assert!((after - before).abs() <= CONSERVATION_TOLERANCE);
}

#[test]
fn invariants_hold_after_a_full_run() {
    let (mut state, mut rng) = build_state(11, &params(30, 5), sample_grid());
    let y_bound = state.grid.y_bound();
    let x_bound = state.grid.x_bound();
    let result = run_simulation(&mut state, 150, &mut rng, &mut NoOpObserver).unwrap();

    for row in state.grid.rows() {
        assert!(row.iter().all(|cell| *cell >= Decimal::ZERO));
    }
    for agent in state.population.agents() {
        assert!(agent.position.y <= y_bound && agent.position.x <= x_bound);
        assert!(agent.store >= Decimal::ZERO);
        assert!(agent.store <= dec!(100));
        assert!(agent.moves <= result.rounds_run);
    }
    for wolf in state.population.wolves() {
        assert!(wolf.position.y <= y_bound && wolf.position.x <= x_bound);
    }
    let dead = state.population.agents().iter().filter(|a| a.liveness == Liveness::Dead).count();
    assert_eq!(u64::try_from(dead).unwrap(), state.population.total_kills());
}

#[test]
fn zero_rounds_leave_a_lone_agent_unchanged() {
    let (mut state, mut rng) = build_state(3, &params(1, 0), sample_grid());
    let before = state.population.snapshot();
    let grid_before = state.grid.clone();

    let result = run_simulation(&mut state, 0, &mut rng, &mut NoOpObserver).unwrap();
    assert_eq!(result.rounds_run, 0);
    assert_eq!(state.population.snapshot(), before);
    assert_eq!(state.grid, grid_before);
}

#[test]
fn lone_agent_on_a_single_cell_is_caught_in_round_one() {
    let grid = Grid::filled(1, 1, dec!(100)).unwrap();
    let (mut state, mut rng) = build_state(5, &params(1, 1), grid);

    let result = run_simulation(&mut state, 50, &mut rng, &mut NoOpObserver).unwrap();
    assert_eq!(result.end_reason, SimulationEndReason::Extinction);
    assert_eq!(result.rounds_run, 1);

    let agent = &state.population.agents()[0];
    assert_eq!(agent.moves, 1);
    assert_eq!(agent.liveness, Liveness::Dead);
    assert_eq!(state.population.wolves()[0].kills, 1);
}

#[test]
fn supplied_start_locations_are_used() {
    let mut p = params(3, 1);
    p.start_locations = vec![Position::new(1, 1), Position::new(2, 2), Position::new(3, 3)];
    p.wolf_pack_start = Some(Position::new(10, 10));
    let (state, _rng) = build_state(9, &p, sample_grid());

    let snapshot = state.population.snapshot();
    let positions: Vec<Position> = snapshot.agents.iter().map(|a| a.position).collect();
    assert_eq!(positions, p.start_locations);
    assert_eq!(snapshot.wolves[0].position, Position::new(10, 10));
}

#[test]
fn config_drives_a_run() {
    let config = SimulationConfig::parse(
        "population:\n  num_of_agents: 4\n  num_of_wolves: 1\nsimulation:\n  num_of_iterations: 12\n",
        |_| None,
    )
    .unwrap();
    config.validate().unwrap();

    let grid = sample_grid();
    let mut rng = seeded_rng(config.world.seed);
    let population = Population::spawn(
        &PopulationParams {
            num_agents: config.population.num_of_agents,
            num_wolves: config.population.num_of_wolves,
            start_locations: Vec::new(),
            wolf_pack_start: config.population.wolf_pack_position(),
            wolf_starts: config.population.wolf_start_positions(),
        },
        grid.y_bound(),
        grid.x_bound(),
        &mut rng,
    )
    .unwrap();
    let mut state = SimulationState::new(
        grid,
        population,
        config.foraging.clone(),
        config.simulation.neighbourhood_radius,
    );

    let result = run_simulation(&mut state, config.simulation.num_of_iterations, &mut rng, &mut NoOpObserver).unwrap();
    assert!(result.rounds_run <= 12);
    assert_eq!(state.population.agent_count(), 4);
}

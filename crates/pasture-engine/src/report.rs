//! Console reports printed around a run.
//!
//! These are plain stdout lines meant for a person watching the run, kept
//! apart from the structured log stream.

use pasture_agents::Population;
use pasture_core::config::SimulationConfig;

/// Render the resolved parameter block.
pub fn params_block(config: &SimulationConfig) -> String {
    format!(
        "Processed with the following arguments:\n\
         \x20- No. Agents: {},\n\
         \x20- Use default Agent start locations: {},\n\
         \x20- No. Agent moves: {},\n\
         \x20- Neighbourhood Distance: {},\n\
         \x20- No. Wolves: {},\n\
         \x20- Plot starting locations: {},\n\
         \x20- Seed: {}.",
        config.population.num_of_agents,
        yes_no(config.population.use_default_start_locations),
        config.simulation.num_of_iterations,
        config.simulation.neighbourhood_radius.normalize(),
        config.population.num_of_wolves,
        yes_no(config.reporting.show_start_plot),
        config.world.seed,
    )
}

/// Render one `<label> - <entity>` line per agent and/or wolf, in
/// current registry order.
pub fn population_lines(label: &str, population: &Population, agents: bool, wolves: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if agents {
        lines.extend(population.agents().iter().map(|a| format!("{label} - {a}")));
    }
    if wolves {
        lines.extend(population.wolves().iter().map(|w| format!("{label} - {w}")));
    }
    lines
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "Y" } else { "N" }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pasture_agents::{Agent, Wolf};
    use pasture_types::{AgentId, Colour, Position, WolfId};

    use super::*;

    #[test]
    fn params_block_lists_every_parameter() {
        let block = params_block(&SimulationConfig::default());
        assert!(block.starts_with("Processed with the following arguments:\n"));
        assert!(block.contains(" - No. Agents: 10,"));
        assert!(block.contains(" - Use default Agent start locations: N,"));
        assert!(block.contains(" - No. Agent moves: 100,"));
        assert!(block.contains(" - Neighbourhood Distance: 20,"));
        assert!(block.contains(" - No. Wolves: 5,"));
        assert!(block.contains(" - Plot starting locations: N,"));
        assert!(block.ends_with(" - Seed: 42."));
    }

    #[test]
    fn population_lines_follow_toggles() {
        let population = Population::from_parts(
            vec![Agent::new(AgentId::new(1).unwrap(), Position::new(2, 3), 9, 9, Colour::default())],
            vec![Wolf::new(WolfId::new(1).unwrap(), Position::new(4, 5), 9, 9, Colour::default())],
        );

        let both = population_lines("Start", &population, true, true);
        assert_eq!(
            both,
            vec![
                "Start - Agent 001: x=003, y=002, moves=0, store=0, alive=Y.".to_owned(),
                "Start - Wolf 001: x=005, y=004, kills=0".to_owned(),
            ]
        );
        assert_eq!(population_lines("Finish", &population, false, true).len(), 1);
        assert!(population_lines("Finish", &population, false, false).is_empty());
    }
}

//! The population registry.
//!
//! [`Population`] owns every [`Agent`] and [`Wolf`] for the whole run.
//! Behaviours that touch more than one entity (sharing, hunting) live here
//! so they can borrow two entries of the registry at once without any
//! entity holding a reference back to its peers.
//!
//! The scheduler reorders both collections each round with
//! [`Population::shuffle`]; an entity's slot therefore changes over time,
//! while its identifier never does.

use pasture_types::{AgentId, Colour, Position, PopulationSnapshot, WolfId};
use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::agent::Agent;
use crate::error::AgentError;
use crate::wolf::{KillRecord, Wolf};

/// Most agents that can take a supplied start location; the rest are placed
/// at random.
pub const MAX_START_LOCATIONS: usize = 100;

/// Everything needed to spawn a population.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulationParams {
    /// Number of foragers.
    pub num_agents: u32,
    /// Number of wolves.
    pub num_wolves: u32,
    /// Supplied `(y, x)` start cells, consumed in order by the first agents.
    pub start_locations: Vec<Position>,
    /// Supplied start cell for the first wolf, which the rest of the pack
    /// then joins.
    pub wolf_pack_start: Option<Position>,
    /// Supplied start cells for individual wolves, consumed in order by the
    /// first wolves. Takes precedence over both the pack start and the
    /// first wolf's cell.
    pub wolf_starts: Vec<Position>,
}

/// Owner of every agent and wolf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Population {
    agents: Vec<Agent>,
    wolves: Vec<Wolf>,
}

impl Population {
    /// Spawn a population on a grid whose largest coordinates are
    /// `y_bound` and `x_bound`.
    ///
    /// Each agent draws its colour, then (unless a start location is
    /// supplied for it) `y` and then `x`. Every wolf draws its colour. A
    /// wolf with its own supplied cell starts there. Otherwise the first
    /// wolf starts on the pack start (or draws `y` and `x`), and every
    /// later wolf starts on the first wolf's cell.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::StartOutOfBounds`] if a supplied location lies
    /// outside the grid, or [`AgentError::IdExhausted`] if a count does not
    /// fit the identifier range.
    pub fn spawn<R: Rng>(
        params: &PopulationParams,
        y_bound: u32,
        x_bound: u32,
        rng: &mut R,
    ) -> Result<Self, AgentError> {
        let in_bounds = |position: Position| -> Result<Position, AgentError> {
            if position.y <= y_bound && position.x <= x_bound {
                Ok(position)
            } else {
                Err(AgentError::StartOutOfBounds {
                    position,
                    y_bound,
                    x_bound,
                })
            }
        };

        let num_agents = usize::try_from(params.num_agents).map_err(|_conversion_err| AgentError::IdExhausted)?;
        let supplied: Vec<Position> = params
            .start_locations
            .iter()
            .take(MAX_START_LOCATIONS.min(num_agents))
            .map(|&position| in_bounds(position))
            .collect::<Result<_, _>>()?;
        if !params.start_locations.is_empty() && supplied.len() < MAX_START_LOCATIONS.min(num_agents) {
            warn!(
                supplied = supplied.len(),
                requested = MAX_START_LOCATIONS.min(num_agents),
                "Fewer start locations than agents; the rest start at random"
            );
        }

        let mut agents = Vec::with_capacity(num_agents);
        for index in 0..num_agents {
            let id = AgentId::from_index(index).ok_or(AgentError::IdExhausted)?;
            let colour = random_colour(rng);
            let position = match supplied.get(index) {
                Some(&position) => position,
                None => random_position(rng, y_bound, x_bound),
            };
            agents.push(Agent::new(id, position, y_bound, x_bound, colour));
        }

        let pack_start = params.wolf_pack_start.map(in_bounds).transpose()?;
        let num_wolves = usize::try_from(params.num_wolves).map_err(|_conversion_err| AgentError::IdExhausted)?;
        let wolf_starts: Vec<Position> = params
            .wolf_starts
            .iter()
            .take(num_wolves)
            .map(|&position| in_bounds(position))
            .collect::<Result<_, _>>()?;
        let mut wolves: Vec<Wolf> = Vec::with_capacity(num_wolves);
        for index in 0..num_wolves {
            let id = WolfId::from_index(index).ok_or(AgentError::IdExhausted)?;
            let colour = random_colour(rng);
            let position = match (wolf_starts.get(index), wolves.first(), pack_start) {
                (Some(&start), _, _) => start,
                (None, Some(leader), _) => leader.position,
                (None, None, Some(start)) => start,
                (None, None, None) => random_position(rng, y_bound, x_bound),
            };
            wolves.push(Wolf::new(id, position, y_bound, x_bound, colour));
        }

        info!(
            agents = agents.len(),
            wolves = wolves.len(),
            supplied_starts = supplied.len(),
            supplied_wolf_starts = wolf_starts.len(),
            "Population spawned"
        );
        Ok(Self { agents, wolves })
    }

    /// Build a population from already-constructed entities.
    pub const fn from_parts(agents: Vec<Agent>, wolves: Vec<Wolf>) -> Self {
        Self { agents, wolves }
    }

    /// Agents in current scheduling order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Mutable agents in current scheduling order.
    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    /// Wolves in current scheduling order.
    pub fn wolves(&self) -> &[Wolf] {
        &self.wolves
    }

    /// Mutable wolves in current scheduling order.
    pub fn wolves_mut(&mut self) -> &mut [Wolf] {
        &mut self.wolves
    }

    /// Look up an agent by identifier.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Look up a wolf by identifier.
    pub fn wolf(&self, id: WolfId) -> Option<&Wolf> {
        self.wolves.iter().find(|w| w.id == id)
    }

    /// Number of agents, alive or dead.
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Number of wolves.
    pub fn wolf_count(&self) -> usize {
        self.wolves.len()
    }

    /// Number of agents still alive.
    pub fn agents_alive(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    /// Sum of every wolf's cumulative kill count.
    pub fn total_kills(&self) -> u64 {
        self.wolves
            .iter()
            .fold(0_u64, |acc, w| acc.saturating_add(u64::from(w.kills)))
    }

    /// Sum of every agent's store, dead agents included.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ArithmeticOverflow`] if the sum overflows.
    pub fn total_store(&self) -> Result<Decimal, AgentError> {
        self.agents.iter().try_fold(Decimal::ZERO, |acc, a| {
            acc.checked_add(a.store)
                .ok_or_else(|| AgentError::ArithmeticOverflow {
                    context: String::from("total store"),
                })
        })
    }

    /// Randomly reorder the agents, then the wolves.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.agents.shuffle(rng);
        self.wolves.shuffle(rng);
    }

    /// Let the agent in `slot` share with every other live agent in range.
    ///
    /// Partners are visited in current registry order and each pairing sees
    /// the acting agent's store as left by the previous one. Returns the
    /// number of pairings made.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::SlotOutOfRange`] for a bad slot and
    /// [`AgentError::ArithmeticOverflow`] if an average overflows.
    pub fn share_with_neighbours(&mut self, slot: usize, radius: Decimal) -> Result<usize, AgentError> {
        let len = self.agents.len();
        if slot >= len {
            return Err(AgentError::SlotOutOfRange { slot, len });
        }
        let mut pairings = 0_usize;
        for other in 0..len {
            let Some((actor, partner)) = pair_mut(&mut self.agents, slot, other) else {
                continue;
            };
            if actor.share_with(partner, radius)? {
                pairings = pairings.saturating_add(1);
            }
        }
        Ok(pairings)
    }

    /// Let the wolf in `slot` hunt across the whole agent list.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::SlotOutOfRange`] for a bad slot.
    pub fn hunt(&mut self, slot: usize) -> Result<Vec<KillRecord>, AgentError> {
        let len = self.wolves.len();
        let wolf = self
            .wolves
            .get_mut(slot)
            .ok_or(AgentError::SlotOutOfRange { slot, len })?;
        Ok(wolf.hunt(&mut self.agents))
    }

    /// Point-in-time view of every entity, in identifier order.
    pub fn snapshot(&self) -> PopulationSnapshot {
        let mut agents: Vec<_> = self.agents.iter().map(Agent::snapshot).collect();
        agents.sort_by_key(|a| a.id);
        let mut wolves: Vec<_> = self.wolves.iter().map(Wolf::snapshot).collect();
        wolves.sort_by_key(|w| w.id);
        PopulationSnapshot { agents, wolves }
    }
}

/// Borrow two distinct entries of a slice mutably, `a` first.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> Option<(&mut T, &mut T)> {
    if a == b {
        return None;
    }
    let (low, high) = if a < b { (a, b) } else { (b, a) };
    let (left, right) = items.split_at_mut_checked(high)?;
    let low_item = left.get_mut(low)?;
    let high_item = right.first_mut()?;
    if a < b {
        Some((low_item, high_item))
    } else {
        Some((high_item, low_item))
    }
}

fn random_colour<R: Rng>(rng: &mut R) -> Colour {
    Colour::from_rgb(rng.random_range(0..=Colour::MAX))
}

fn random_position<R: Rng>(rng: &mut R, y_bound: u32, x_bound: u32) -> Position {
    let y = rng.random_range(0..=y_bound);
    let x = rng.random_range(0..=x_bound);
    Position::new(y, x)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pasture_types::Liveness;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rust_decimal_macros::dec;

    use super::*;

    fn params(num_agents: u32, num_wolves: u32) -> PopulationParams {
        PopulationParams {
            num_agents,
            num_wolves,
            ..PopulationParams::default()
        }
    }

    fn agent_at(number: u32, y: u32, x: u32, store: Decimal) -> Agent {
        let mut agent = Agent::new(AgentId::new(number).unwrap(), Position::new(y, x), 99, 99, Colour::default());
        agent.store = store;
        agent
    }

    #[test]
    fn spawn_numbers_entities_in_creation_order() {
        let mut rng = SmallRng::seed_from_u64(42);
        let population = Population::spawn(&params(5, 3), 9, 19, &mut rng).unwrap();
        let agent_numbers: Vec<u32> = population.agents().iter().map(|a| a.id.number()).collect();
        assert_eq!(agent_numbers, vec![1, 2, 3, 4, 5]);
        let wolf_numbers: Vec<u32> = population.wolves().iter().map(|w| w.id.number()).collect();
        assert_eq!(wolf_numbers, vec![1, 2, 3]);
        for agent in population.agents() {
            assert!(agent.position.y <= 9 && agent.position.x <= 19);
            assert_eq!(agent.store, dec!(0));
            assert_eq!(agent.liveness, Liveness::Alive);
        }
    }

    #[test]
    fn wolves_start_as_a_pack() {
        let mut rng = SmallRng::seed_from_u64(7);
        let population = Population::spawn(&params(1, 4), 99, 99, &mut rng).unwrap();
        let leader = population.wolves()[0].position;
        assert!(population.wolves().iter().all(|w| w.position == leader));
    }

    #[test]
    fn supplied_locations_go_to_the_first_agents() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut p = params(3, 1);
        p.start_locations = vec![Position::new(1, 2), Position::new(3, 4)];
        p.wolf_pack_start = Some(Position::new(5, 6));
        let population = Population::spawn(&p, 9, 9, &mut rng).unwrap();
        assert_eq!(population.agents()[0].position, Position::new(1, 2));
        assert_eq!(population.agents()[1].position, Position::new(3, 4));
        assert_eq!(population.wolves()[0].position, Position::new(5, 6));
    }

    #[test]
    fn wolves_with_supplied_cells_leave_the_pack() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut p = params(0, 3);
        p.wolf_pack_start = Some(Position::new(1, 1));
        p.wolf_starts = vec![Position::new(1, 1), Position::new(7, 8)];
        let population = Population::spawn(&p, 9, 9, &mut rng).unwrap();

        let positions: Vec<Position> = population.wolves().iter().map(|w| w.position).collect();
        assert_eq!(positions, vec![Position::new(1, 1), Position::new(7, 8), Position::new(1, 1)]);
    }

    #[test]
    fn own_cell_beats_the_pack_start_for_the_first_wolf() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut p = params(0, 2);
        p.wolf_pack_start = Some(Position::new(1, 1));
        p.wolf_starts = vec![Position::new(3, 4)];
        let population = Population::spawn(&p, 9, 9, &mut rng).unwrap();
        assert!(population.wolves().iter().all(|w| w.position == Position::new(3, 4)));
    }

    #[test]
    fn out_of_bounds_wolf_cell_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut p = params(0, 2);
        p.wolf_starts = vec![Position::new(0, 0), Position::new(0, 10)];
        assert!(matches!(
            Population::spawn(&p, 9, 9, &mut rng),
            Err(AgentError::StartOutOfBounds { .. })
        ));
    }

    #[test]
    fn supplied_locations_beyond_the_agent_count_are_ignored() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut p = params(1, 0);
        // The second location is out of bounds but never consumed.
        p.start_locations = vec![Position::new(1, 1), Position::new(50, 50)];
        let population = Population::spawn(&p, 9, 9, &mut rng).unwrap();
        assert_eq!(population.agent_count(), 1);
    }

    #[test]
    fn out_of_bounds_location_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut p = params(2, 0);
        p.start_locations = vec![Position::new(10, 0)];
        assert!(matches!(
            Population::spawn(&p, 9, 9, &mut rng),
            Err(AgentError::StartOutOfBounds { y_bound: 9, x_bound: 9, .. })
        ));
    }

    #[test]
    fn spawn_is_deterministic_per_seed() {
        let a = Population::spawn(&params(10, 3), 99, 99, &mut SmallRng::seed_from_u64(5)).unwrap();
        let b = Population::spawn(&params(10, 3), 99, 99, &mut SmallRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_keeps_ids_and_snapshot_order() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut population = Population::spawn(&params(20, 5), 99, 99, &mut rng).unwrap();
        let before = population.snapshot();
        population.shuffle(&mut rng);
        assert_eq!(population.snapshot(), before);
        let id = AgentId::new(13).unwrap();
        assert_eq!(population.agent(id).unwrap().id, id);
    }

    #[test]
    fn sharing_propagates_sequentially() {
        let mut population = Population::from_parts(
            vec![
                agent_at(1, 0, 0, dec!(0)),
                agent_at(2, 0, 0, dec!(40)),
                agent_at(3, 0, 0, dec!(80)),
            ],
            Vec::new(),
        );
        let pairings = population.share_with_neighbours(0, dec!(1)).unwrap();
        assert_eq!(pairings, 2);
        let stores: Vec<Decimal> = population.agents().iter().map(|a| a.store).collect();
        // 0 & 40 -> 20; then 20 & 80 -> 50.
        assert_eq!(stores, vec![dec!(50), dec!(20), dec!(50)]);
    }

    #[test]
    fn sharing_skips_dead_and_distant_agents() {
        let mut dead = agent_at(2, 0, 0, dec!(40));
        dead.liveness = Liveness::Dead;
        let mut population = Population::from_parts(
            vec![agent_at(1, 0, 0, dec!(10)), dead, agent_at(3, 50, 50, dec!(90))],
            Vec::new(),
        );
        assert_eq!(population.share_with_neighbours(0, dec!(20)).unwrap(), 0);
        assert_eq!(population.total_store().unwrap(), dec!(140));
    }

    #[test]
    fn sharing_from_a_later_slot_sees_earlier_partners() {
        let mut population = Population::from_parts(
            vec![agent_at(1, 0, 0, dec!(10)), agent_at(2, 0, 0, dec!(30))],
            Vec::new(),
        );
        assert_eq!(population.share_with_neighbours(1, dec!(0)).unwrap(), 1);
        assert!(population.agents().iter().all(|a| a.store == dec!(20)));
    }

    #[test]
    fn bad_slots_are_errors() {
        let mut population = Population::default();
        assert!(matches!(
            population.share_with_neighbours(0, dec!(1)),
            Err(AgentError::SlotOutOfRange { slot: 0, len: 0 })
        ));
        assert!(matches!(population.hunt(2), Err(AgentError::SlotOutOfRange { slot: 2, len: 0 })));
    }

    #[test]
    fn hunting_updates_totals() {
        let wolf = Wolf::new(WolfId::new(1).unwrap(), Position::new(0, 0), 99, 99, Colour::default());
        let mut population = Population::from_parts(
            vec![agent_at(1, 0, 0, dec!(5)), agent_at(2, 1, 1, dec!(5))],
            vec![wolf],
        );
        let records = population.hunt(0).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(population.agents_alive(), 1);
        assert_eq!(population.total_kills(), 1);
        // Dead agents keep their store.
        assert_eq!(population.total_store().unwrap(), dec!(10));
    }

    #[test]
    fn pair_mut_returns_requested_order() {
        let mut items = vec![1, 2, 3];
        let (a, b) = pair_mut(&mut items, 2, 0).unwrap();
        assert_eq!((*a, *b), (3, 1));
        assert!(pair_mut(&mut items, 1, 1).is_none());
        assert!(pair_mut(&mut items, 0, 3).is_none());
    }
}

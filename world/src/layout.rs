//! Session layout: the maze, its goal and the demonstrated route.

use maze_explorer_core::{CellCoord, CellKind, ConfigError, GridMap, SessionConfig};
use maze_explorer_system_maze_generation::{generate, select_goal};
use maze_explorer_system_pathfinding::shortest_path;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

const RESET_SEED_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

/// Immutable layout shared by every tick of a session.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Layout {
    pub(crate) map: GridMap,
    pub(crate) goal: CellCoord,
    pub(crate) path: Vec<CellCoord>,
    pub(crate) seed: u64,
}

impl Layout {
    /// Generates a maze, stamps a goal and computes the route from the start.
    pub(crate) fn generate(config: &SessionConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut map = generate(
            config.width,
            config.height,
            config.reward_probability,
            &mut rng,
        )?;
        ensure_start(&map, config.start)?;
        if map.kind(config.start) == Some(CellKind::Reward) {
            let _ = map.set(config.start, CellKind::Open);
        }
        let goal = select_goal(&mut map, config.start, config.min_goal_distance, &mut rng)?;
        Ok(Self::route(map, config.start, goal, seed))
    }

    /// Adopts a hand-authored map.
    ///
    /// An existing goal cell is kept; otherwise one is selected with the
    /// session seed. Maps with several goals, or a goal on the start cell, are
    /// rejected.
    pub(crate) fn from_map(
        config: &SessionConfig,
        mut map: GridMap,
    ) -> Result<Self, ConfigError> {
        ensure_start(&map, config.start)?;

        let goals: Vec<CellCoord> = map
            .iter()
            .filter(|(_, kind)| *kind == CellKind::Goal)
            .map(|(cell, _)| cell)
            .collect();

        let goal = match goals.as_slice() {
            [] => {
                let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
                select_goal(&mut map, config.start, config.min_goal_distance, &mut rng)?
            }
            [goal] if *goal != config.start => *goal,
            _ => return Err(ConfigError::NoValidGoal),
        };
        Ok(Self::route(map, config.start, goal, config.seed))
    }

    fn route(map: GridMap, start: CellCoord, goal: CellCoord, seed: u64) -> Self {
        let path = shortest_path(&map, start, goal);
        if path.is_empty() {
            warn!(
                goal_column = goal.column(),
                goal_row = goal.row(),
                "goal is unreachable from the start cell"
            );
        } else {
            debug!(steps = path.len() - 1, seed, "computed demonstration route");
        }

        Self {
            map,
            goal,
            path,
            seed,
        }
    }
}

/// Seed used for the maze generated by the `reset_count`-th reset.
pub(crate) fn reset_seed(base: u64, reset_count: u32) -> u64 {
    base ^ u64::from(reset_count).wrapping_mul(RESET_SEED_STRIDE)
}

fn ensure_start(map: &GridMap, start: CellCoord) -> Result<(), ConfigError> {
    if map.is_traversable(start) {
        Ok(())
    } else {
        Err(ConfigError::InvalidStart {
            column: start.column(),
            row: start.row(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_layout_routes_start_to_goal() {
        let config = SessionConfig::constrained().with_seed(5);
        let layout = Layout::generate(&config, config.seed).expect("layout");
        assert_eq!(layout.path.first(), Some(&config.start));
        assert_eq!(layout.path.last(), Some(&layout.goal));
        assert_eq!(layout.map.kind(layout.goal), Some(CellKind::Goal));
    }

    #[test]
    fn authored_goal_is_kept() {
        let map = GridMap::from_ascii("#####\n#..G#\n#####").expect("valid grid");
        let config = SessionConfig::standard();
        let layout = Layout::from_map(&config, map).expect("layout");
        assert_eq!(layout.goal, CellCoord::new(3, 1));
        assert_eq!(layout.path.len(), 3);
    }

    #[test]
    fn authored_map_must_have_open_start() {
        let map = GridMap::from_ascii("#####\n##..#\n#####").expect("valid grid");
        let error = Layout::from_map(&SessionConfig::standard(), map).unwrap_err();
        assert_eq!(error, ConfigError::InvalidStart { column: 1, row: 1 });
    }

    #[test]
    fn multiple_authored_goals_are_rejected() {
        let map = GridMap::from_ascii("#####\n#.GG#\n#####").expect("valid grid");
        let error = Layout::from_map(&SessionConfig::standard(), map).unwrap_err();
        assert_eq!(error, ConfigError::NoValidGoal);
    }

    #[test]
    fn authored_goal_on_start_is_rejected() {
        let map = GridMap::from_ascii("#####\n#G..#\n#####").expect("valid grid");
        let error = Layout::from_map(&SessionConfig::standard(), map).unwrap_err();
        assert_eq!(error, ConfigError::NoValidGoal);
    }

    #[test]
    fn start_cell_never_holds_a_reward() {
        let config = SessionConfig {
            reward_probability: 0.3,
            ..SessionConfig::constrained()
        };
        for seed in 0..64 {
            let layout = Layout::generate(&config, seed).expect("layout");
            assert_eq!(layout.map.kind(config.start), Some(CellKind::Open), "seed {seed}");
            assert!(layout.map.count(CellKind::Reward) > 0, "seed {seed}");
        }
    }

    #[test]
    fn reset_seeds_differ_per_reset() {
        assert_eq!(reset_seed(42, 0), 42);
        assert_ne!(reset_seed(42, 1), reset_seed(42, 2));
        assert_ne!(reset_seed(42, 1), 42);
    }
}

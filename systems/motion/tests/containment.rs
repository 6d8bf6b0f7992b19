use maze_explorer_core::{CellCoord, ContinuousPosition, Direction};
use maze_explorer_system_maze_generation::generate;
use maze_explorer_system_motion::{advance, try_move};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::North),
        Just(Direction::South),
        Just(Direction::West),
        Just(Direction::East),
    ]
}

proptest! {
    #[test]
    fn random_walks_stay_on_open_cells(
        seed in any::<u64>(),
        moves in prop::collection::vec(direction_strategy(), 1..80),
        speed in 0.05f32..1.5,
        ticks in 0.1f32..6.0,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let map = generate(17, 22, 0.04, &mut rng).expect("valid maze");
        let width = map.width() as f32;
        let height = map.height() as f32;

        let mut cell = CellCoord::new(1, 1);
        let mut position = ContinuousPosition::center_of(cell);

        for direction in moves {
            let Some(target) = try_move(cell, direction, &map) else {
                continue;
            };
            prop_assert!(map.is_traversable(target));

            loop {
                let step = advance(position, target, speed, ticks);
                position = step.position;
                prop_assert!(position.x() >= 0.0 && position.x() < width);
                prop_assert!(position.y() >= 0.0 && position.y() < height);
                if step.arrived {
                    break;
                }
            }
            cell = target;
            prop_assert_eq!(position.cell(), Some(cell));
        }
    }
}

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use maze_explorer_core::{Command, Event, InputIntent, ResetLayout, SessionConfig};
use maze_explorer_world::{self as world, query, World};

#[test]
fn deterministic_replay_produces_identical_sessions() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first.events, second.events, "event log diverged between runs");
    assert_eq!(first.snapshot, second.snapshot, "final state diverged");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

struct ReplayOutcome {
    events: Vec<Event>,
    snapshot: query::SimulationSnapshot,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.events.hash(&mut hasher);
        self.snapshot.discovered.hash(&mut hasher);
        self.snapshot.player_cell.hash(&mut hasher);
        hasher.finish()
    }
}

fn config() -> SessionConfig {
    SessionConfig {
        reset_layout: ResetLayout::NewMaze,
        ..SessionConfig::constrained().with_seed(0x5eed)
    }
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::new(config()).expect("valid session");
    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    ReplayOutcome {
        events,
        snapshot: query::snapshot(&world),
    }
}

fn scripted_commands() -> Vec<Command> {
    let pattern = [
        InputIntent::Right,
        InputIntent::Right,
        InputIntent::Down,
        InputIntent::None,
        InputIntent::Left,
        InputIntent::Down,
        InputIntent::Up,
    ];

    let mut commands = Vec::new();
    for frame in 0..2_400u32 {
        let intent = pattern[(frame / 11) as usize % pattern.len()];
        let dt = Duration::from_millis(u64::from(12 + frame % 9));
        commands.push(Command::Tick { dt, intent });
        if frame == 1_800 {
            commands.push(Command::Reset);
        }
    }
    commands
}

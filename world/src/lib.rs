#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for Maze Explorer.
//!
//! A [`World`] owns one session: the maze layout, the player, the camera and
//! the fog-of-war memory. Hosts drive it once per frame through [`apply`] (or
//! the value-threading [`step`]) and render whatever the [`query`] functions
//! report. The world performs no I/O and reads no clock; its evolution is a
//! pure function of the commands it receives.

use std::{collections::BTreeSet, time::Duration};

use maze_explorer_core::{
    CellCoord, CellKind, Command, ConfigError, ContinuousPosition, Event, GamePhase, GridMap,
    InputIntent, ResetLayout, SessionConfig, MAX_TICK_DURATION, TICK_QUANTUM,
};
use maze_explorer_system_exploration::{reveal, Discovered};
use maze_explorer_system_motion::{advance, follow, path_cursor, try_move};
use tracing::{debug, error, info, warn};

mod layout;
mod phase;

use layout::{reset_seed, Layout};

/// Represents one Maze Explorer session.
#[derive(Clone, Debug)]
pub struct World {
    config: SessionConfig,
    layout: Layout,
    phase: GamePhase,
    player: Player,
    camera: ContinuousPosition,
    path_progress: f32,
    discovered: Discovered,
    triggered_rewards: BTreeSet<CellCoord>,
    tick_index: u64,
    reset_count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Player {
    position: ContinuousPosition,
    cell: CellCoord,
    target: CellCoord,
    moving: bool,
}

impl Player {
    fn at(cell: CellCoord) -> Self {
        Self {
            position: ContinuousPosition::center_of(cell),
            cell,
            target: cell,
            moving: false,
        }
    }
}

impl World {
    /// Bootstraps a session with a procedurally generated maze.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = Layout::generate(&config, config.seed)?;
        info!(
            width = config.width,
            height = config.height,
            seed = config.seed,
            "session started"
        );
        Ok(Self::with_layout(config, layout))
    }

    /// Bootstraps a session on a hand-authored map.
    ///
    /// A goal already present on the map is kept; otherwise one is selected
    /// using the configured seed. Generation parameters in `config` only apply
    /// to mazes created by later resets with [`ResetLayout::NewMaze`].
    pub fn from_map(config: SessionConfig, map: GridMap) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = Layout::from_map(&config, map)?;
        info!(
            width = layout.map.width(),
            height = layout.map.height(),
            "session started on authored map"
        );
        Ok(Self::with_layout(config, layout))
    }

    fn with_layout(config: SessionConfig, layout: Layout) -> Self {
        let player = Player::at(config.start);
        Self {
            camera: player.position,
            player,
            config,
            layout,
            phase: GamePhase::ShowingPath,
            path_progress: 0.0,
            discovered: Discovered::new(),
            triggered_rewards: BTreeSet::new(),
            tick_index: 0,
            reset_count: 0,
        }
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        let reset_count = self.reset_count.saturating_add(1);
        let layout = match self.config.reset_layout {
            ResetLayout::SameMaze => self.layout.clone(),
            ResetLayout::NewMaze => {
                let seed = reset_seed(self.config.seed, reset_count);
                match Layout::generate(&self.config, seed) {
                    Ok(layout) => layout,
                    Err(error) => {
                        warn!(%error, seed, "maze regeneration failed, replaying current maze");
                        self.layout.clone()
                    }
                }
            }
        };

        *self = Self::with_layout(self.config.clone(), layout);
        self.reset_count = reset_count;
        info!(reset_count, seed = self.layout.seed, "session reset");
        out_events.push(Event::SessionReset);
    }

    fn enter(&mut self, to: GamePhase, out_events: &mut Vec<Event>) {
        let from = self.phase;
        let requested = phase::transition(from, to);
        debug_assert!(
            requested.is_ok(),
            "invalid phase transition from {from:?} to {to:?}"
        );
        match requested {
            Ok(next) => {
                self.phase = next;
                info!(?from, to = ?next, tick = self.tick_index, "phase changed");
                out_events.push(Event::PhaseChanged { from, to: next });
            }
            Err(error) => error!(%error, "rejected phase transition"),
        }
    }

    fn tick(&mut self, dt: Duration, intent: InputIntent, out_events: &mut Vec<Event>) {
        let dt = if dt > MAX_TICK_DURATION {
            debug!(?dt, "clamping oversized frame");
            MAX_TICK_DURATION
        } else {
            dt
        };
        out_events.push(Event::TimeAdvanced { dt });

        if self.phase.is_terminal() {
            return;
        }

        self.tick_index = self.tick_index.saturating_add(1);
        let ticks = dt.as_secs_f32() / TICK_QUANTUM.as_secs_f32();

        match self.phase {
            GamePhase::ShowingPath => self.demonstrate(ticks, out_events),
            GamePhase::Exploring => self.explore(intent, ticks, out_events),
            GamePhase::Completed => {}
        }
    }

    fn demonstrate(&mut self, ticks: f32, out_events: &mut Vec<Event>) {
        self.path_progress += self.config.path_progress_per_tick * ticks;
        let cursor = path_cursor(&self.layout.path, self.path_progress)
            .unwrap_or(self.player.position);
        self.camera = follow(self.camera, cursor, self.config.camera_lerp, ticks);

        if phase::demonstration_finished(
            self.path_progress,
            self.layout.path.len(),
            self.config.path_overshoot,
        ) {
            self.enter(GamePhase::Exploring, out_events);
            self.reveal_around_player();
        }
    }

    fn explore(&mut self, intent: InputIntent, ticks: f32, out_events: &mut Vec<Event>) {
        if !self.player.moving {
            let destination = intent
                .direction()
                .and_then(|direction| try_move(self.player.cell, direction, &self.layout.map));
            if let Some(destination) = destination {
                self.player.target = destination;
                self.player.moving = true;
            }
        }

        let mut landed = None;
        if self.player.moving {
            let step = advance(
                self.player.position,
                self.player.target,
                self.config.move_speed,
                ticks,
            );
            self.player.position = step.position;

            if step.arrived {
                let from = self.player.cell;
                let to = self.player.target;
                self.player.cell = to;
                self.player.moving = false;
                out_events.push(Event::PlayerAdvanced { from, to });
                landed = Some(to);

                if self.layout.map.kind(to) == Some(CellKind::Reward)
                    && self.triggered_rewards.insert(to)
                {
                    debug!(column = to.column(), row = to.row(), "reward triggered");
                    out_events.push(Event::RewardTriggered { cell: to });
                }
            }
        }

        self.reveal_around_player();
        self.camera = follow(
            self.camera,
            self.player.position,
            self.config.camera_lerp,
            ticks,
        );

        if landed == Some(self.layout.goal) {
            self.enter(GamePhase::Completed, out_events);
            out_events.push(Event::GoalReached {
                cell: self.layout.goal,
            });
        }
    }

    fn reveal_around_player(&mut self) {
        let center = self.player.position.cell().unwrap_or(self.player.cell);
        let discovered = std::mem::take(&mut self.discovered);
        self.discovered = reveal(
            discovered,
            center,
            self.config.vision_radius,
            &self.layout.map,
        );
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt, intent } => world.tick(dt, intent, out_events),
        Command::Reset => world.reset(out_events),
    }
}

/// Advances the world by one frame, threading it by value.
///
/// Equivalent to [`apply`] with [`Command::Tick`], returning the next state
/// together with the events the frame produced.
#[must_use]
pub fn step(mut world: World, intent: InputIntent, dt: Duration) -> (World, Vec<Event>) {
    let mut events = Vec::new();
    apply(&mut world, Command::Tick { dt, intent }, &mut events);
    (world, events)
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::collections::BTreeSet;

    use maze_explorer_core::{
        CellCoord, ContinuousPosition, GamePhase, GridMap, SessionConfig,
    };
    use maze_explorer_system_exploration::Discovered;
    use maze_explorer_system_motion::path_cursor as cursor_along;
    use serde::Serialize;

    use super::World;

    /// Provides read-only access to the maze.
    #[must_use]
    pub fn grid_map(world: &World) -> &GridMap {
        &world.layout.map
    }

    /// Phase the session is currently in.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Continuous position of the player.
    #[must_use]
    pub fn player_position(world: &World) -> ContinuousPosition {
        world.player.position
    }

    /// Cell the player last arrived on.
    #[must_use]
    pub fn player_cell(world: &World) -> CellCoord {
        world.player.cell
    }

    /// Destination of the move in flight, if any.
    #[must_use]
    pub fn player_target(world: &World) -> Option<CellCoord> {
        world.player.moving.then_some(world.player.target)
    }

    /// Reports whether a move is in flight.
    #[must_use]
    pub fn is_moving(world: &World) -> bool {
        world.player.moving
    }

    /// Continuous position of the camera.
    #[must_use]
    pub fn camera(world: &World) -> ContinuousPosition {
        world.camera
    }

    /// Shortest route from the start to the goal.
    #[must_use]
    pub fn path(world: &World) -> &[CellCoord] {
        &world.layout.path
    }

    /// Progress of the route demonstration, in cells along the route.
    #[must_use]
    pub fn path_progress(world: &World) -> f32 {
        world.path_progress
    }

    /// Position of the demonstration cursor along the route.
    #[must_use]
    pub fn path_cursor(world: &World) -> Option<ContinuousPosition> {
        cursor_along(&world.layout.path, world.path_progress)
    }

    /// Cells revealed so far.
    #[must_use]
    pub fn discovered(world: &World) -> &Discovered {
        &world.discovered
    }

    /// Reports whether the host should draw the provided cell.
    #[must_use]
    pub fn is_visible(world: &World, cell: CellCoord) -> bool {
        maze_explorer_system_exploration::is_visible(&world.discovered, cell, world.phase)
    }

    /// Goal cell of the session.
    #[must_use]
    pub fn goal(world: &World) -> CellCoord {
        world.layout.goal
    }

    /// Reward cells the player already landed on.
    #[must_use]
    pub fn triggered_rewards(world: &World) -> &BTreeSet<CellCoord> {
        &world.triggered_rewards
    }

    /// Configuration the session was started with.
    #[must_use]
    pub fn config(world: &World) -> &SessionConfig {
        &world.config
    }

    /// Number of resets performed since the session was created.
    #[must_use]
    pub fn reset_count(world: &World) -> u32 {
        world.reset_count
    }

    /// Number of simulated ticks since the last reset, excluding ticks
    /// received after completion.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures an owned snapshot of the dynamic session state.
    #[must_use]
    pub fn snapshot(world: &World) -> SimulationSnapshot {
        SimulationSnapshot {
            phase: world.phase,
            player: world.player.position,
            player_cell: world.player.cell,
            player_target: player_target(world),
            camera: world.camera,
            path_progress: world.path_progress,
            goal: world.layout.goal,
            layout_seed: world.layout.seed,
            discovered: world.discovered.iter().copied().collect(),
            triggered_rewards: world.triggered_rewards.iter().copied().collect(),
            tick_index: world.tick_index,
            reset_count: world.reset_count,
        }
    }

    /// Owned, serialisable view of the dynamic session state.
    #[derive(Clone, Debug, PartialEq, Serialize)]
    pub struct SimulationSnapshot {
        /// Active phase.
        pub phase: GamePhase,
        /// Continuous player position.
        pub player: ContinuousPosition,
        /// Cell the player last arrived on.
        pub player_cell: CellCoord,
        /// Destination of the move in flight, if any.
        pub player_target: Option<CellCoord>,
        /// Continuous camera position.
        pub camera: ContinuousPosition,
        /// Route demonstration progress.
        pub path_progress: f32,
        /// Goal cell.
        pub goal: CellCoord,
        /// Seed the current maze was generated from.
        pub layout_seed: u64,
        /// Revealed cells in ascending order.
        pub discovered: Vec<CellCoord>,
        /// Triggered reward cells in ascending order.
        pub triggered_rewards: Vec<CellCoord>,
        /// Simulated ticks since the last reset.
        pub tick_index: u64,
        /// Resets performed so far.
        pub reset_count: u32,
    }
}

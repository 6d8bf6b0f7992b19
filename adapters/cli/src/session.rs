//! Headless host loop that renders and auto-plays a session.

use std::time::Duration;

use maze_explorer_core::{
    CellCoord, CellKind, Command, Event, GamePhase, InputIntent, IntentLatch,
};
use maze_explorer_world::{self as world, query, World};
use serde::Serialize;
use tracing::{debug, info};

/// Frame delta used by the headless loop.
pub(crate) const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on simulated frames before autoplay gives up.
const FRAME_LIMIT: u64 = 200_000;

/// Outcome reported once autoplay stops.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct Summary {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) seed: u64,
    pub(crate) route_steps: usize,
    pub(crate) ticks: u64,
    pub(crate) rewards_triggered: usize,
    pub(crate) cells_discovered: usize,
    pub(crate) completed: bool,
}

impl Summary {
    fn capture(world: &World, ticks: u64) -> Self {
        let map = query::grid_map(world);
        Self {
            width: map.width(),
            height: map.height(),
            seed: query::config(world).seed,
            route_steps: query::path(world).len().saturating_sub(1),
            ticks,
            rewards_triggered: query::triggered_rewards(world).len(),
            cells_discovered: query::discovered(world).len(),
            completed: query::phase(world) == GamePhase::Completed,
        }
    }

    /// Human readable multi-line report.
    pub(crate) fn to_text(&self) -> String {
        format!(
            "maze {}x{} (seed {})\nroute: {} steps\nticks: {}\nrewards: {}\ndiscovered: {} cells\ncompleted: {}",
            self.width,
            self.height,
            self.seed,
            self.route_steps,
            self.ticks,
            self.rewards_triggered,
            self.cells_discovered,
            if self.completed { "yes" } else { "no" },
        )
    }
}

/// Plays the session to completion by walking the demonstrated route.
///
/// Intents are fed through an [`IntentLatch`] the way a touch host would
/// latch a tap, so the engine sees the same input shape as in play.
pub(crate) fn autoplay(world: &mut World) -> Summary {
    let route = query::path(world).to_vec();
    let mut latch = IntentLatch::default();
    let mut events = Vec::new();
    let mut frames = 0;

    while query::phase(world) != GamePhase::Completed && frames < FRAME_LIMIT {
        if query::phase(world) == GamePhase::Exploring && !query::is_moving(world) {
            if let Some(intent) = next_intent(&route, world) {
                if latch.current() != intent {
                    latch.assert(intent);
                }
            }
        }

        let intent = latch.poll(FRAME);
        events.clear();
        world::apply(world, Command::Tick { dt: FRAME, intent }, &mut events);
        frames += 1;
        report(&events);
    }

    Summary::capture(world, frames)
}

fn next_intent(route: &[CellCoord], world: &World) -> Option<InputIntent> {
    let here = query::player_cell(world);
    let index = route.iter().position(|cell| *cell == here)?;
    let next = route.get(index + 1)?;
    here.direction_to(*next).map(InputIntent::from)
}

fn report(events: &[Event]) {
    for event in events {
        match event {
            Event::PhaseChanged { from, to } => info!(?from, ?to, "phase changed"),
            Event::RewardTriggered { cell } => {
                info!(column = cell.column(), row = cell.row(), "reward reached")
            }
            Event::GoalReached { cell } => {
                info!(column = cell.column(), row = cell.row(), "goal reached")
            }
            Event::PlayerAdvanced { from, to } => debug!(?from, ?to, "player advanced"),
            Event::TimeAdvanced { .. } | Event::SessionReset => {}
        }
    }
}

/// Renders the maze with the player marked `@`.
///
/// With `fog` set, cells the player cannot currently see are left blank.
pub(crate) fn render(world: &World, fog: bool) -> String {
    let map = query::grid_map(world);
    let player = query::player_cell(world);
    let mut text = String::new();

    for row in 0..map.height() {
        if row > 0 {
            text.push('\n');
        }
        for column in 0..map.width() {
            let cell = CellCoord::new(column, row);
            let symbol = if cell == player {
                '@'
            } else if fog && !query::is_visible(world, cell) {
                ' '
            } else {
                match map.kind(cell) {
                    Some(CellKind::Wall) | None => '#',
                    Some(CellKind::Open) => '.',
                    Some(CellKind::Reward) => '*',
                    Some(CellKind::Goal) => 'G',
                }
            };
            text.push(symbol);
        }
    }
    text
}

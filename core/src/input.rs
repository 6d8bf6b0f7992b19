//! Host-side helpers that resolve raw input into a single [`InputIntent`].
//!
//! The engine consumes exactly one intent per tick. Keyboards, swipe gestures
//! and on-screen pads all funnel through these helpers so every host applies
//! the same tie-break and hold-window rules.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Direction;

/// Default minimum swipe length, in pixels, before a gesture counts.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 40.0;

/// Default time an asserted intent stays active before auto-clearing.
pub const DEFAULT_INTENT_WINDOW: Duration = Duration::from_millis(160);

/// Directional intent resolved by the host for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputIntent {
    /// No movement requested.
    #[default]
    None,
    /// Move toward decreasing rows.
    Up,
    /// Move toward increasing rows.
    Down,
    /// Move toward decreasing columns.
    Left,
    /// Move toward increasing columns.
    Right,
}

impl InputIntent {
    /// Resolves simultaneously held directional keys into one intent.
    ///
    /// The first held key in the order Up, Down, Left, Right wins.
    #[must_use]
    pub const fn from_held(up: bool, down: bool, left: bool, right: bool) -> Self {
        if up {
            Self::Up
        } else if down {
            Self::Down
        } else if left {
            Self::Left
        } else if right {
            Self::Right
        } else {
            Self::None
        }
    }

    /// Decodes a swipe gesture from its pixel deltas.
    ///
    /// The axis with the larger absolute delta wins, and that delta must reach
    /// `min_distance`. Screen coordinates grow downward, so a positive `dy` is
    /// a downward swipe.
    #[must_use]
    pub fn from_swipe(dx: f32, dy: f32, min_distance: f32) -> Self {
        if !(dx.is_finite() && dy.is_finite()) {
            return Self::None;
        }

        if dx.abs() > dy.abs() {
            if dx.abs() < min_distance {
                Self::None
            } else if dx > 0.0 {
                Self::Right
            } else {
                Self::Left
            }
        } else if dy.abs() < min_distance || dy == 0.0 {
            Self::None
        } else if dy > 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }

    /// Grid direction requested by the intent, if any.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::None => None,
            Self::Up => Some(Direction::North),
            Self::Down => Some(Direction::South),
            Self::Left => Some(Direction::West),
            Self::Right => Some(Direction::East),
        }
    }
}

impl From<Direction> for InputIntent {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::Up,
            Direction::South => Self::Down,
            Direction::West => Self::Left,
            Direction::East => Self::Right,
        }
    }
}

/// Holds an asserted intent for a short window, then clears it.
///
/// Taps and swipes are instantaneous while movement needs the intent to be
/// present on the tick when the player is ready to move, so hosts latch the
/// intent and poll the latch once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntentLatch {
    window: Duration,
    intent: InputIntent,
    held_for: Duration,
}

impl IntentLatch {
    /// Creates an empty latch that holds intents for `window`.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            intent: InputIntent::None,
            held_for: Duration::ZERO,
        }
    }

    /// Asserts a new intent, restarting the hold window.
    pub fn assert(&mut self, intent: InputIntent) {
        self.intent = intent;
        self.held_for = Duration::ZERO;
    }

    /// Returns the intent active for the current frame and ages the latch.
    ///
    /// The intent is reported on every poll until the accumulated `dt`
    /// reaches the window.
    pub fn poll(&mut self, dt: Duration) -> InputIntent {
        let current = self.intent;
        if current == InputIntent::None {
            return current;
        }

        self.held_for = self.held_for.saturating_add(dt);
        if self.held_for >= self.window {
            self.intent = InputIntent::None;
            self.held_for = Duration::ZERO;
        }
        current
    }

    /// Intent currently held, without ageing the latch.
    #[must_use]
    pub const fn current(&self) -> InputIntent {
        self.intent
    }
}

impl Default for IntentLatch {
    fn default() -> Self {
        Self::new(DEFAULT_INTENT_WINDOW)
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Explorer engine.
//!
//! This crate defines the message surface that connects hosts, the
//! authoritative world, and pure systems. Hosts submit [`Command`] values once
//! per frame, the world executes those commands via its `apply` entry point,
//! and then reports [`Event`] values describing what happened during the tick.
//! Systems are pure functions over the [`GridMap`] and the coordinate types
//! defined here; none of them hold hidden state between ticks.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod config;
mod grid;
pub mod input;

pub use config::{ResetLayout, SessionConfig};
pub use grid::GridMap;
pub use input::{InputIntent, IntentLatch};

/// Smallest width or height accepted for a generated maze.
pub const MIN_MAZE_DIMENSION: u32 = 5;

/// Largest width or height accepted for a generated maze.
pub const MAX_MAZE_DIMENSION: u32 = 1024;

/// Duration of one reference simulation tick (a 60 Hz frame).
///
/// Per-tick tuning values such as move speed and path progress are expressed
/// relative to this quantum.
pub const TICK_QUANTUM: Duration = Duration::from_nanos(16_666_667);

/// Longest frame the engine will simulate in a single step.
///
/// Larger deltas, for example after a backgrounded tab resumes, are clamped so
/// a single step cannot tunnel the player through several cells.
pub const MAX_TICK_DURATION: Duration = Duration::from_millis(100);

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by one host frame.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
        /// Directional intent resolved by the host for this frame.
        intent: InputIntent,
    },
    /// Discards the current session and restarts at the path demonstration.
    ///
    /// Whether the maze layout survives is decided by
    /// [`SessionConfig::reset_layout`].
    Reset,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick, after clamping.
        dt: Duration,
    },
    /// Announces that the game moved from one phase into another.
    PhaseChanged {
        /// Phase that was active before the transition.
        from: GamePhase,
        /// Phase that became active.
        to: GamePhase,
    },
    /// Confirms that the player finished moving between two cells.
    PlayerAdvanced {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player landed on.
        to: CellCoord,
    },
    /// Reports that the player landed on a reward cell for the first time.
    ///
    /// The host decides what the reward interaction looks like.
    RewardTriggered {
        /// Reward cell that was reached.
        cell: CellCoord,
    },
    /// Reports that the player reached the goal and the session completed.
    GoalReached {
        /// Goal cell that was reached.
        cell: CellCoord,
    },
    /// Confirms that the session was reset to its initial phase.
    SessionReset,
}

/// Phases the exploration game moves through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// The route to the goal is demonstrated and player input is ignored.
    ShowingPath,
    /// The player explores the maze under fog-of-war.
    Exploring,
    /// The goal was reached; only a reset leaves this phase.
    Completed,
}

impl GamePhase {
    /// Reports whether the phase is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Kind of content stored in a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Impassable cell.
    Wall,
    /// Empty, traversable cell.
    Open,
    /// Traversable cell that triggers a reward interaction on arrival.
    Reward,
    /// Traversable cell the player must reach.
    Goal,
}

impl CellKind {
    /// Reports whether the player may stand on a cell of this kind.
    #[must_use]
    pub const fn is_traversable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
    /// Movement toward increasing column indices.
    East,
}

impl Direction {
    /// Every direction in canonical enumeration order (up, down, left, right).
    ///
    /// Searches that must break ties deterministically iterate in this order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Squared Euclidean distance between two cell coordinates.
    #[must_use]
    pub fn distance_squared(self, other: CellCoord) -> u64 {
        let columns = u64::from(self.column().abs_diff(other.column()));
        let rows = u64::from(self.row().abs_diff(other.row()));
        columns * columns + rows * rows
    }

    /// Cell adjacent to this one in the provided direction.
    ///
    /// Returns `None` when the step would leave a `columns` × `rows` grid.
    #[must_use]
    pub fn step(self, direction: Direction, columns: u32, rows: u32) -> Option<CellCoord> {
        let (column, row) = match direction {
            Direction::North => (self.column, self.row.checked_sub(1)?),
            Direction::South => (self.column, self.row.checked_add(1)?),
            Direction::West => (self.column.checked_sub(1)?, self.row),
            Direction::East => (self.column.checked_add(1)?, self.row),
        };

        if column < columns && row < rows {
            Some(CellCoord::new(column, row))
        } else {
            None
        }
    }

    /// Direction of travel between two 4-adjacent cells.
    #[must_use]
    pub fn direction_to(self, other: CellCoord) -> Option<Direction> {
        let column_diff = self.column().abs_diff(other.column());
        let row_diff = self.row().abs_diff(other.row());
        if column_diff + row_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if other.column() > self.column() {
                Some(Direction::East)
            } else {
                Some(Direction::West)
            }
        } else if other.row() > self.row() {
            Some(Direction::South)
        } else {
            Some(Direction::North)
        }
    }
}

/// Sub-cell position measured in cell units.
///
/// The integer part identifies the cell and the fractional part is the offset
/// within it, so the centre of cell `(c, r)` is `(c + 0.5, r + 0.5)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContinuousPosition {
    x: f32,
    y: f32,
}

impl ContinuousPosition {
    /// Creates a position from raw cell-unit coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Position of the centre of the provided cell.
    #[must_use]
    pub fn center_of(cell: CellCoord) -> Self {
        Self {
            x: cell.column() as f32 + 0.5,
            y: cell.row() as f32 + 0.5,
        }
    }

    /// Horizontal coordinate in cell units.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in cell units.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Cell containing the position, or `None` when it lies at negative
    /// coordinates.
    #[must_use]
    pub fn cell(&self) -> Option<CellCoord> {
        if !(self.x >= 0.0 && self.y >= 0.0) {
            return None;
        }
        Some(CellCoord::new(self.x.floor() as u32, self.y.floor() as u32))
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance(&self, other: ContinuousPosition) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Errors raised while bootstrapping a session.
///
/// These are fatal to the session; the host must retry with corrected
/// parameters.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The requested maze dimensions fall outside the supported range.
    #[error("maze dimensions {width}x{height} are outside the supported range")]
    InvalidDimensions {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
    /// The reward probability is not a finite value in `[0, 1]`.
    #[error("reward probability {0} must lie within [0, 1]")]
    InvalidRewardProbability(f64),
    /// A tuning parameter is not a finite positive number.
    #[error("tuning parameter `{name}` must be finite and positive, got {value}")]
    InvalidTuning {
        /// Name of the offending parameter.
        name: &'static str,
        /// Value that was supplied.
        value: f32,
    },
    /// The player start lies outside the traversable interior.
    #[error("start cell ({column}, {row}) is not an open interior cell")]
    InvalidStart {
        /// Column of the requested start.
        column: u32,
        /// Row of the requested start.
        row: u32,
    },
    /// No open cell could host the goal.
    #[error("the maze contains no open cell that can host the goal")]
    NoValidGoal,
}

/// Contract violations detected by the phase machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PhaseError {
    /// The requested phase change is not part of the game flow.
    #[error("invalid phase transition from {from:?} to {to:?}")]
    InvalidStateTransition {
        /// Phase that was active.
        from: GamePhase,
        /// Phase that was requested.
        to: GamePhase,
    },
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, CellKind, ContinuousPosition, Direction, Event, GamePhase};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn step_stays_inside_grid() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Direction::North, 3, 3), None);
        assert_eq!(corner.step(Direction::West, 3, 3), None);
        assert_eq!(
            corner.step(Direction::East, 3, 3),
            Some(CellCoord::new(1, 0))
        );

        let far = CellCoord::new(2, 2);
        assert_eq!(far.step(Direction::South, 3, 3), None);
        assert_eq!(far.step(Direction::East, 3, 3), None);
    }

    #[test]
    fn direction_to_neighbors() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(
            origin.direction_to(CellCoord::new(3, 2)),
            Some(Direction::North)
        );
        assert_eq!(
            origin.direction_to(CellCoord::new(4, 3)),
            Some(Direction::East)
        );
        assert_eq!(
            origin.direction_to(CellCoord::new(3, 4)),
            Some(Direction::South)
        );
        assert_eq!(
            origin.direction_to(CellCoord::new(2, 3)),
            Some(Direction::West)
        );
        assert_eq!(origin.direction_to(origin), None);
        assert_eq!(origin.direction_to(CellCoord::new(4, 4)), None);
    }

    #[test]
    fn center_floors_back_to_cell() {
        let cell = CellCoord::new(7, 2);
        let center = ContinuousPosition::center_of(cell);
        assert_eq!(center.cell(), Some(cell));
        assert!((center.x() - 7.5).abs() < f32::EPSILON);
        assert!((center.y() - 2.5).abs() < f32::EPSILON);
        assert_eq!(ContinuousPosition::new(-0.1, 1.0).cell(), None);
    }

    #[test]
    fn only_walls_block_traversal() {
        assert!(!CellKind::Wall.is_traversable());
        assert!(CellKind::Open.is_traversable());
        assert!(CellKind::Reward.is_traversable());
        assert!(CellKind::Goal.is_traversable());
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(5, 7));
    }

    #[test]
    fn phase_events_round_trip_through_bincode() {
        assert_round_trip(&Event::PhaseChanged {
            from: GamePhase::Exploring,
            to: GamePhase::Completed,
        });
        assert_round_trip(&Event::RewardTriggered {
            cell: CellCoord::new(3, 9),
        });
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Continuous motion primitives for the player, the path cursor and the
//! camera.
//!
//! Grid moves are decided discretely with [`try_move`] and then animated with
//! [`advance`], which closes the distance at a constant speed and snaps onto
//! the cell centre on arrival. The camera uses [`follow`] instead, an
//! exponential chase that never settles discretely.

use glam::Vec2;
use maze_explorer_core::{CellCoord, ContinuousPosition, Direction, GridMap};

/// Remaining distance, in cells, under which a move counts as arrived.
pub const ARRIVAL_EPSILON: f32 = 0.05;

/// Outcome of advancing toward a target cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Advance {
    /// Position after the advance.
    pub position: ContinuousPosition,
    /// Whether the position now rests exactly on the target's centre.
    pub arrived: bool,
}

/// Destination of a single grid step, or `None` when the step is blocked.
///
/// Steps leaving the grid or entering a wall are rejected.
#[must_use]
pub fn try_move(current: CellCoord, direction: Direction, map: &GridMap) -> Option<CellCoord> {
    let destination = current.step(direction, map.width(), map.height())?;
    map.is_traversable(destination).then_some(destination)
}

/// Moves `position` toward the centre of `target` by `speed × ticks` cells.
///
/// Once the remaining distance drops below [`ARRIVAL_EPSILON`] the position
/// snaps exactly onto the centre, so advancing an arrived position again is a
/// no-op.
#[must_use]
pub fn advance(
    position: ContinuousPosition,
    target: CellCoord,
    speed: f32,
    ticks: f32,
) -> Advance {
    let destination = ContinuousPosition::center_of(target);
    let current = to_vec(position);
    let goal = to_vec(destination);

    let offset = goal - current;
    let remaining = offset.length();
    let budget = (speed * ticks).max(0.0);

    let moved = if remaining <= budget || remaining == 0.0 {
        goal
    } else {
        current + offset / remaining * budget
    };

    if moved.distance(goal) < ARRIVAL_EPSILON {
        Advance {
            position: destination,
            arrived: true,
        }
    } else {
        Advance {
            position: from_vec(moved),
            arrived: false,
        }
    }
}

/// Exponentially smooths `camera` toward `target`.
///
/// Each reference tick closes `lerp_factor` of the remaining gap; fractional
/// tick counts compound the same way so frame rate does not change the feel.
#[must_use]
pub fn follow(
    camera: ContinuousPosition,
    target: ContinuousPosition,
    lerp_factor: f32,
    ticks: f32,
) -> ContinuousPosition {
    let factor = lerp_factor.clamp(0.0, 1.0);
    let blend = 1.0 - (1.0 - factor).powf(ticks.max(0.0));
    from_vec(to_vec(camera).lerp(to_vec(target), blend))
}

/// Position of the demonstration cursor `progress` cells along `path`.
///
/// Progress interpolates between consecutive cell centres and clamps to the
/// final cell, which lets the demonstration linger there. Returns `None` for
/// an empty path.
#[must_use]
pub fn path_cursor(path: &[CellCoord], progress: f32) -> Option<ContinuousPosition> {
    let last = path.len().checked_sub(1)?;
    let progress = progress.max(0.0);
    let index = (progress.floor() as usize).min(last);
    let from = ContinuousPosition::center_of(path[index]);

    if index == last {
        return Some(from);
    }

    let to = ContinuousPosition::center_of(path[index + 1]);
    let fraction = progress - index as f32;
    Some(from_vec(to_vec(from).lerp(to_vec(to), fraction)))
}

fn to_vec(position: ContinuousPosition) -> Vec2 {
    Vec2::new(position.x(), position.y())
}

fn from_vec(vector: Vec2) -> ContinuousPosition {
    ContinuousPosition::new(vector.x, vector.y)
}

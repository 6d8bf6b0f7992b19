#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural maze generation and goal placement.
//!
//! Mazes are carved with recursive division: the interior starts fully open
//! and is repeatedly bisected by wall lines that each keep exactly one gap.
//! Walls only ever occupy even coordinates and gaps odd ones, so a later wall
//! can never seal an earlier gap and every open cell stays reachable.

use maze_explorer_core::{
    CellCoord, CellKind, ConfigError, GridMap, MAX_MAZE_DIMENSION, MIN_MAZE_DIMENSION,
};
use rand::Rng;
use tracing::debug;

/// Generates a fully connected maze with probabilistic reward cells.
///
/// The outer ring is always wall and the cell `(1, 1)` is always open. Each
/// open cell independently becomes a reward with `reward_probability`.
pub fn generate<R>(
    width: u32,
    height: u32,
    reward_probability: f64,
    rng: &mut R,
) -> Result<GridMap, ConfigError>
where
    R: Rng + ?Sized,
{
    let valid_dimension = |value: u32| (MIN_MAZE_DIMENSION..=MAX_MAZE_DIMENSION).contains(&value);
    if !valid_dimension(width) || !valid_dimension(height) {
        return Err(ConfigError::InvalidDimensions { width, height });
    }
    if !(0.0..=1.0).contains(&reward_probability) {
        return Err(ConfigError::InvalidRewardProbability(reward_probability));
    }

    let mut map = GridMap::filled(width, height, CellKind::Open);
    build_border(&mut map);
    divide(&mut map, rng);
    let rewards = sprinkle_rewards(&mut map, reward_probability, rng);

    debug!(
        width,
        height,
        walls = map.count(CellKind::Wall),
        rewards,
        "generated maze"
    );
    Ok(map)
}

/// Chooses a goal cell and stamps it onto the map.
///
/// Candidates are open cells whose Manhattan distance from `start` exceeds
/// `min_distance`; one is drawn uniformly. When none qualifies the farthest
/// open cell is used instead, the first in row-major order on ties. Reward
/// cells never host the goal.
pub fn select_goal<R>(
    map: &mut GridMap,
    start: CellCoord,
    min_distance: u32,
    rng: &mut R,
) -> Result<CellCoord, ConfigError>
where
    R: Rng + ?Sized,
{
    let open: Vec<CellCoord> = map
        .iter()
        .filter(|(cell, kind)| *kind == CellKind::Open && *cell != start)
        .map(|(cell, _)| cell)
        .collect();

    let candidates: Vec<CellCoord> = open
        .iter()
        .copied()
        .filter(|cell| cell.manhattan_distance(start) > min_distance)
        .collect();

    let goal = if candidates.is_empty() {
        let farthest = farthest_from(&open, start).ok_or(ConfigError::NoValidGoal)?;
        debug!(
            column = farthest.column(),
            row = farthest.row(),
            min_distance,
            "no goal candidate beyond minimum distance, using farthest open cell"
        );
        farthest
    } else {
        candidates[rng.gen_range(0..candidates.len())]
    };

    let _ = map.set(goal, CellKind::Goal);
    debug!(
        column = goal.column(),
        row = goal.row(),
        candidates = candidates.len(),
        "selected goal"
    );
    Ok(goal)
}

fn farthest_from(cells: &[CellCoord], start: CellCoord) -> Option<CellCoord> {
    let mut best: Option<(u32, CellCoord)> = None;
    for &cell in cells {
        let distance = cell.manhattan_distance(start);
        if distance == 0 {
            continue;
        }
        match best {
            Some((best_distance, _)) if best_distance >= distance => {}
            _ => best = Some((distance, cell)),
        }
    }
    best.map(|(_, cell)| cell)
}

/// Inclusive rectangle of open interior cells awaiting division.
///
/// `left` and `top` are always odd.
#[derive(Clone, Copy, Debug)]
struct Chamber {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
}

impl Chamber {
    fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Orientation {
    Horizontal,
    Vertical,
}

fn build_border(map: &mut GridMap) {
    let (width, height) = (map.width(), map.height());
    for column in 0..width {
        let _ = map.set(CellCoord::new(column, 0), CellKind::Wall);
        let _ = map.set(CellCoord::new(column, height - 1), CellKind::Wall);
    }
    for row in 0..height {
        let _ = map.set(CellCoord::new(0, row), CellKind::Wall);
        let _ = map.set(CellCoord::new(width - 1, row), CellKind::Wall);
    }
}

fn divide<R>(map: &mut GridMap, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let mut pending = vec![Chamber {
        left: 1,
        top: 1,
        right: map.width() - 2,
        bottom: map.height() - 2,
    }];

    while let Some(chamber) = pending.pop() {
        let Some(orientation) = choose_orientation(chamber, rng) else {
            continue;
        };

        match orientation {
            Orientation::Horizontal => {
                let wall_row = pick_stride_two(chamber.top + 1, chamber.bottom - 1, rng);
                let gap_column = pick_stride_two(chamber.left, chamber.right, rng);
                for column in chamber.left..=chamber.right {
                    if column != gap_column {
                        let _ = map.set(CellCoord::new(column, wall_row), CellKind::Wall);
                    }
                }
                pending.push(Chamber {
                    bottom: wall_row - 1,
                    ..chamber
                });
                pending.push(Chamber {
                    top: wall_row + 1,
                    ..chamber
                });
            }
            Orientation::Vertical => {
                let wall_column = pick_stride_two(chamber.left + 1, chamber.right - 1, rng);
                let gap_row = pick_stride_two(chamber.top, chamber.bottom, rng);
                for row in chamber.top..=chamber.bottom {
                    if row != gap_row {
                        let _ = map.set(CellCoord::new(wall_column, row), CellKind::Wall);
                    }
                }
                pending.push(Chamber {
                    right: wall_column - 1,
                    ..chamber
                });
                pending.push(Chamber {
                    left: wall_column + 1,
                    ..chamber
                });
            }
        }
    }
}

/// Picks the cut orientation, bisecting across the longer side.
///
/// Chambers narrower than three cells along an axis cannot be cut across it.
fn choose_orientation<R>(chamber: Chamber, rng: &mut R) -> Option<Orientation>
where
    R: Rng + ?Sized,
{
    let horizontal = chamber.height() >= 3;
    let vertical = chamber.width() >= 3;

    match (horizontal, vertical) {
        (false, false) => None,
        (true, false) => Some(Orientation::Horizontal),
        (false, true) => Some(Orientation::Vertical),
        (true, true) => Some(if chamber.width() < chamber.height() {
            Orientation::Horizontal
        } else if chamber.height() < chamber.width() {
            Orientation::Vertical
        } else if rng.gen_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }),
    }
}

/// Uniformly picks one of `low`, `low + 2`, ... not exceeding `high`.
///
/// The result shares the parity of `low`.
fn pick_stride_two<R>(low: u32, high: u32, rng: &mut R) -> u32
where
    R: Rng + ?Sized,
{
    let slots = (high - low) / 2 + 1;
    low + 2 * rng.gen_range(0..slots)
}

fn sprinkle_rewards<R>(map: &mut GridMap, probability: f64, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    if probability <= 0.0 {
        return 0;
    }

    let open: Vec<CellCoord> = map
        .iter()
        .filter(|(_, kind)| *kind == CellKind::Open)
        .map(|(cell, _)| cell)
        .collect();

    let mut rewards = 0;
    for cell in open {
        if rng.gen_bool(probability) {
            let _ = map.set(cell, CellKind::Reward);
            rewards += 1;
        }
    }
    rewards
}

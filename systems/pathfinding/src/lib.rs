#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first shortest paths over the maze grid.

use std::collections::VecDeque;

use maze_explorer_core::{CellCoord, Direction, GridMap};

/// Computes a shortest 4-directional route from `start` to `goal`.
///
/// The returned sequence includes both endpoints. Any non-wall cell is
/// traversable. Among equally short routes the one found by expanding
/// neighbours in [`Direction::ALL`] order wins. An empty sequence means no
/// route exists, including when either endpoint is a wall or out of bounds.
#[must_use]
pub fn shortest_path(map: &GridMap, start: CellCoord, goal: CellCoord) -> Vec<CellCoord> {
    if !map.is_traversable(start) || !map.is_traversable(goal) {
        return Vec::new();
    }
    if start == goal {
        return vec![start];
    }

    let width = usize::try_from(map.width()).unwrap_or(0);
    let height = usize::try_from(map.height()).unwrap_or(0);
    let Some(cell_count) = width.checked_mul(height) else {
        return Vec::new();
    };

    let mut parents: Vec<Option<CellCoord>> = vec![None; cell_count];
    let mut visited = vec![false; cell_count];
    let mut queue = VecDeque::new();

    let Some(start_index) = index(width, start) else {
        return Vec::new();
    };
    visited[start_index] = true;
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        for direction in Direction::ALL {
            let Some(neighbor) = cell.step(direction, map.width(), map.height()) else {
                continue;
            };
            if !map.is_traversable(neighbor) {
                continue;
            }
            let Some(neighbor_index) = index(width, neighbor) else {
                continue;
            };
            if visited[neighbor_index] {
                continue;
            }

            visited[neighbor_index] = true;
            parents[neighbor_index] = Some(cell);
            if neighbor == goal {
                return reconstruct(&parents, width, start, goal);
            }
            queue.push_back(neighbor);
        }
    }

    Vec::new()
}

/// Number of steps on a shortest route, or `None` when unreachable.
#[must_use]
pub fn path_length(map: &GridMap, start: CellCoord, goal: CellCoord) -> Option<usize> {
    let path = shortest_path(map, start, goal);
    path.len().checked_sub(1)
}

fn reconstruct(
    parents: &[Option<CellCoord>],
    width: usize,
    start: CellCoord,
    goal: CellCoord,
) -> Vec<CellCoord> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        let Some(parent) = index(width, current).and_then(|offset| parents[offset]) else {
            return Vec::new();
        };
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

fn index(width: usize, cell: CellCoord) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(text: &str) -> GridMap {
        GridMap::from_ascii(text).expect("valid grid")
    }

    #[test]
    fn start_equals_goal_yields_single_cell() {
        let grid = map("###\n#.#\n###");
        let cell = CellCoord::new(1, 1);
        assert_eq!(shortest_path(&grid, cell, cell), vec![cell]);
        assert_eq!(path_length(&grid, cell, cell), Some(0));
    }

    #[test]
    fn routes_around_walls() {
        let grid = map(
            "
            #####
            #...#
            ###.#
            #...#
            #####
            ",
        );
        let path = shortest_path(&grid, CellCoord::new(1, 1), CellCoord::new(1, 3));
        assert_eq!(
            path,
            vec![
                CellCoord::new(1, 1),
                CellCoord::new(2, 1),
                CellCoord::new(3, 1),
                CellCoord::new(3, 2),
                CellCoord::new(3, 3),
                CellCoord::new(2, 3),
                CellCoord::new(1, 3),
            ]
        );
    }

    #[test]
    fn rewards_and_goals_are_traversable() {
        let grid = map("#####\n#.*G#\n#####");
        let path = shortest_path(&grid, CellCoord::new(1, 1), CellCoord::new(3, 1));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn unreachable_goal_yields_empty_path() {
        let grid = map("#####\n#.#.#\n#####");
        assert!(shortest_path(&grid, CellCoord::new(1, 1), CellCoord::new(3, 1)).is_empty());
        assert_eq!(path_length(&grid, CellCoord::new(1, 1), CellCoord::new(3, 1)), None);
    }

    #[test]
    fn wall_or_out_of_bounds_endpoints_yield_empty_path() {
        let grid = map("#####\n#...#\n#####");
        assert!(shortest_path(&grid, CellCoord::new(0, 0), CellCoord::new(3, 1)).is_empty());
        assert!(shortest_path(&grid, CellCoord::new(1, 1), CellCoord::new(9, 9)).is_empty());
    }

    #[test]
    fn ties_prefer_vertical_moves_first() {
        let grid = map(
            "
            ####
            #..#
            #..#
            ####
            ",
        );
        let path = shortest_path(&grid, CellCoord::new(1, 1), CellCoord::new(2, 2));
        assert_eq!(
            path,
            vec![
                CellCoord::new(1, 1),
                CellCoord::new(1, 2),
                CellCoord::new(2, 2),
            ]
        );
    }
}

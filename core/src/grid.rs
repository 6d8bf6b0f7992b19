//! Dense cell-kind grid shared by every system.

use serde::{Deserialize, Serialize};

use crate::{CellCoord, CellKind};

/// Row-major grid describing the kind of every maze cell.
///
/// Generation writes walls and rewards, goal selection stamps a single goal
/// cell, and from then on the world only hands out shared references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMap {
    width: u32,
    height: u32,
    cells: Vec<CellKind>,
}

impl GridMap {
    /// Creates a grid where every cell has the provided kind.
    #[must_use]
    pub fn filled(width: u32, height: u32, kind: CellKind) -> Self {
        let count = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            width,
            height,
            cells: vec![kind; count],
        }
    }

    /// Parses a grid from text rows.
    ///
    /// `#` is a wall, `.` open, `*` a reward and `G` the goal. Returns `None`
    /// when the rows are ragged, empty, or contain any other character.
    #[must_use]
    pub fn from_ascii(text: &str) -> Option<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first()?.chars().count();
        if width == 0 {
            return None;
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for row in &rows {
            if row.chars().count() != width {
                return None;
            }
            for symbol in row.chars() {
                cells.push(match symbol {
                    '#' => CellKind::Wall,
                    '.' => CellKind::Open,
                    '*' => CellKind::Reward,
                    'G' => CellKind::Goal,
                    _ => return None,
                });
            }
        }

        Some(Self {
            width: u32::try_from(width).ok()?,
            height: u32::try_from(rows.len()).ok()?,
            cells,
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Kind stored at the provided cell, or `None` when out of bounds.
    #[must_use]
    pub fn kind(&self, cell: CellCoord) -> Option<CellKind> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell is inside the grid and not a wall.
    #[must_use]
    pub fn is_traversable(&self, cell: CellCoord) -> bool {
        self.kind(cell).is_some_and(CellKind::is_traversable)
    }

    /// Overwrites the kind of a single cell.
    ///
    /// Returns `false` without modifying the grid when the cell is out of
    /// bounds.
    pub fn set(&mut self, cell: CellCoord, kind: CellKind) -> bool {
        match self.index(cell).and_then(|index| self.cells.get_mut(index)) {
            Some(slot) => {
                *slot = kind;
                true
            }
            None => false,
        }
    }

    /// Iterates every cell with its kind in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellKind)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(index, kind)| {
            let index = index as u32;
            (CellCoord::new(index % width, index / width), *kind)
        })
    }

    /// Number of cells holding the provided kind.
    #[must_use]
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|candidate| **candidate == kind).count()
    }

    /// Renders the grid using the symbols accepted by [`GridMap::from_ascii`].
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let width = usize::try_from(self.width).unwrap_or(0);
        let mut text = String::with_capacity(self.cells.len() + self.cells.len() / width.max(1));
        for (index, kind) in self.cells.iter().enumerate() {
            if index > 0 && index % width == 0 {
                text.push('\n');
            }
            text.push(match kind {
                CellKind::Wall => '#',
                CellKind::Open => '.',
                CellKind::Reward => '*',
                CellKind::Goal => 'G',
            });
        }
        text
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

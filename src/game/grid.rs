//! Occupancy grid
//!
//! One cell per discrete arena coordinate. Each cell is either empty or holds
//! the id of the snake whose trail covers it. The grid is shared by every
//! snake of a round and is only written after a collision verdict.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::util::vec2::Vec2;

/// Snake identifier as stored in the grid. `0` is reserved for empty cells.
pub type AgentId = u8;

/// Marker stored in unowned cells
pub const EMPTY: AgentId = 0;

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Quantise a continuous position to the cell it rounds to
    #[inline]
    pub fn from_position(position: Vec2) -> Self {
        Self {
            x: position.x.round() as i32,
            y: position.y.round() as i32,
        }
    }

    /// Cell centre as a continuous position
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl From<Vec2> for Cell {
    fn from(position: Vec2) -> Self {
        Self::from_position(position)
    }
}

/// A non-empty grid cell together with its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedCell {
    pub cell: Cell,
    pub owner: AgentId,
}

/// Inclusive rectangle of cells, already clipped to a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRect {
    pub x: RangeInclusive<i32>,
    pub y: RangeInclusive<i32>,
}

impl CellRect {
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty()
    }

    /// Number of cells covered
    pub fn area(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let w = (self.x.end() - self.x.start() + 1) as usize;
        let h = (self.y.end() - self.y.start() + 1) as usize;
        w * h
    }

    /// Cells in column-major order (x outer, y inner)
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.x
            .clone()
            .flat_map(move |x| self.y.clone().map(move |y| Cell::new(x, y)))
    }
}

/// Fixed-size 2D ownership map for one round
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<AgentId>,
}

impl OccupancyGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell lies inside the allocated extents
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width + cell.x as usize)
    }

    /// Owner of the cell, `None` when empty or out of range
    #[inline]
    pub fn owner(&self, cell: Cell) -> Option<AgentId> {
        self.index(cell)
            .map(|i| self.cells[i])
            .filter(|&owner| owner != EMPTY)
    }

    #[inline]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.owner(cell).is_some()
    }

    /// Mark the cell as owned by `id`. Out-of-range cells are ignored and
    /// reported with `false`.
    pub fn claim(&mut self, cell: Cell, id: AgentId) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.cells[i] = id;
                true
            }
            None => false,
        }
    }

    /// Square window of half-width `half` around `center`, clipped to the grid
    pub fn window(&self, center: Cell, half: i32) -> CellRect {
        let max_x = self.width as i32 - 1;
        let max_y = self.height as i32 - 1;
        CellRect {
            x: (center.x - half).max(0)..=(center.x + half).min(max_x),
            y: (center.y - half).max(0)..=(center.y + half).min(max_y),
        }
    }

    /// Occupied cells inside a clipped window
    pub fn occupied_in<'a>(&'a self, rect: &'a CellRect) -> impl Iterator<Item = OwnedCell> + 'a {
        rect.cells().filter_map(move |cell| {
            self.owner(cell).map(|owner| OwnedCell { cell, owner })
        })
    }

    /// Total number of owned cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&owner| owner != EMPTY).count()
    }

    /// Number of cells owned by a given snake
    pub fn count_owned_by(&self, id: AgentId) -> usize {
        self.cells.iter().filter(|&&owner| owner == id).count()
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = OccupancyGrid::new(20, 10);
        assert_eq!(grid.width(), 20);
        assert_eq!(grid.height(), 10);
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.owner(Cell::new(3, 3)), None);
    }

    #[test]
    fn test_claim_and_owner() {
        let mut grid = OccupancyGrid::new(20, 10);
        assert!(grid.claim(Cell::new(19, 9), 2));
        assert_eq!(grid.owner(Cell::new(19, 9)), Some(2));
        assert!(grid.is_occupied(Cell::new(19, 9)));
        assert_eq!(grid.count_owned_by(2), 1);
        // distinct from the transposed cell
        assert_eq!(grid.owner(Cell::new(9, 19)), None);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut grid = OccupancyGrid::new(20, 10);
        assert!(!grid.claim(Cell::new(20, 0), 1));
        assert!(!grid.claim(Cell::new(0, -1), 1));
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.owner(Cell::new(-5, -5)), None);
    }

    #[test]
    fn test_cell_rounding() {
        assert_eq!(Cell::from_position(Vec2::new(10.4, 10.6)), Cell::new(10, 11));
        assert_eq!(Cell::from(Vec2::new(1076.5, 0.49)), Cell::new(1077, 0));
    }

    #[test]
    fn test_window_interior() {
        let grid = OccupancyGrid::new(100, 100);
        let rect = grid.window(Cell::new(50, 50), 10);
        assert_eq!(rect.x, 40..=60);
        assert_eq!(rect.y, 40..=60);
        assert_eq!(rect.area(), 21 * 21);
        assert_eq!(rect.cells().count(), 21 * 21);
    }

    #[test]
    fn test_window_clipped_at_edges() {
        let grid = OccupancyGrid::new(100, 80);
        let rect = grid.window(Cell::new(3, 78), 10);
        assert_eq!(rect.x, 0..=13);
        assert_eq!(rect.y, 68..=79);
        assert!(rect.cells().all(|c| grid.contains(c)));
    }

    #[test]
    fn test_window_far_outside_is_empty() {
        let grid = OccupancyGrid::new(100, 80);
        let rect = grid.window(Cell::new(-50, 40), 10);
        assert!(rect.is_empty());
        assert_eq!(rect.area(), 0);
        assert_eq!(rect.cells().count(), 0);
    }

    #[test]
    fn test_occupied_in_window() {
        let mut grid = OccupancyGrid::new(50, 50);
        grid.claim(Cell::new(10, 10), 1);
        grid.claim(Cell::new(12, 9), 3);
        grid.claim(Cell::new(40, 40), 2);

        let rect = grid.window(Cell::new(11, 10), 4);
        let found: Vec<_> = grid.occupied_in(&rect).collect();
        assert_eq!(
            found,
            vec![
                OwnedCell { cell: Cell::new(10, 10), owner: 1 },
                OwnedCell { cell: Cell::new(12, 9), owner: 3 },
            ]
        );
    }

    #[test]
    fn test_clear() {
        let mut grid = OccupancyGrid::new(5, 5);
        grid.claim(Cell::new(1, 1), 1);
        grid.clear();
        assert_eq!(grid.occupied_count(), 0);
    }
}

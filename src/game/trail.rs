//! Trail history: the last few head cells of a snake, newest first.
//!
//! These cells are exempt from self-collision, otherwise a snake would always
//! hit the segment it laid down a frame ago.

use crate::game::grid::Cell;
use crate::util::vec2::Vec2;

/// Fixed-capacity history of rounded head positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailHistory {
    cells: Box<[Cell]>,
}

impl TrailHistory {
    /// History of `len` slots, every slot holding the spawn cell
    pub fn new(len: usize, spawn: Vec2) -> Self {
        debug_assert!(len > 0, "trail history needs at least one slot");
        Self {
            cells: vec![Cell::from_position(spawn); len].into_boxed_slice(),
        }
    }

    /// Shifted copy: slot 0 is the rounded `position`, the oldest slot drops out
    #[must_use]
    pub fn pushed(&self, position: Vec2) -> Self {
        let newest = Cell::from_position(position);
        let cells = std::iter::once(newest)
            .chain(self.cells.iter().take(self.cells.len() - 1).copied())
            .collect();
        Self { cells }
    }

    /// Replace `self` with [`TrailHistory::pushed`]
    pub fn push(&mut self, position: Vec2) {
        *self = self.pushed(position);
    }

    /// Most recently pushed cell
    #[inline]
    pub fn newest(&self) -> Cell {
        self.cells[0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefilled_with_spawn() {
        let history = TrailHistory::new(5, Vec2::new(135.0, 112.5));
        assert_eq!(history.len(), 5);
        assert!(history.iter().all(|c| c == Cell::new(135, 113)));
    }

    #[test]
    fn test_push_shifts_and_rounds() {
        let history = TrailHistory::new(3, Vec2::new(0.0, 0.0));
        let history = history.pushed(Vec2::new(1.2, 1.7));
        let history = history.pushed(Vec2::new(2.6, 3.1));
        let cells: Vec<_> = history.iter().collect();
        assert_eq!(cells, vec![Cell::new(3, 3), Cell::new(1, 2), Cell::new(0, 0)]);

        let history = history.pushed(Vec2::new(9.0, 9.0));
        let cells: Vec<_> = history.iter().collect();
        assert_eq!(cells, vec![Cell::new(9, 9), Cell::new(3, 3), Cell::new(1, 2)]);
    }

    #[test]
    fn test_pushed_leaves_original_untouched() {
        let original = TrailHistory::new(4, Vec2::new(5.0, 5.0));
        let next = original.pushed(Vec2::new(8.0, 5.0));
        assert_eq!(original.newest(), Cell::new(5, 5));
        assert_eq!(next.newest(), Cell::new(8, 5));
    }

    #[test]
    fn test_length_invariant_over_many_pushes() {
        let mut history = TrailHistory::new(5, Vec2::new(100.0, 100.0));
        for i in 0..500 {
            let p = Vec2::new(100.0 + i as f32 * 0.7, 100.0 - i as f32 * 0.3);
            history.push(p);
            assert_eq!(history.len(), 5);
            assert_eq!(history.newest(), Cell::from_position(p));
        }
    }

    #[test]
    fn test_single_slot_history() {
        let mut history = TrailHistory::new(1, Vec2::new(1.0, 1.0));
        history.push(Vec2::new(4.0, 4.0));
        assert_eq!(history.len(), 1);
        assert!(history.contains(Cell::new(4, 4)));
        assert!(!history.contains(Cell::new(1, 1)));
    }
}

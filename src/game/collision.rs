//! Collision engine
//!
//! Decides whether a snake head placed at a candidate position survives:
//! 1. wall test on the rounded head against the arena edges
//! 2. windowed occupancy scan of half-width 2R around the head, clipped to
//!    the grid, restricted to a circle of radius 2R and skipping the snake's
//!    own recent head cells
//!
//! A single-cell probe would miss overlaps because the head circle spans many
//! cells, hence the window.

use serde::Serialize;

use crate::game::grid::{AgentId, Cell, OccupancyGrid};
use crate::game::trail::TrailHistory;
use crate::util::vec2::Vec2;

/// Cause of a fatal collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Collision {
    /// Head circle crossed an arena edge
    Wall,
    /// Head circle overlapped a trail cell (possibly its own)
    Trail { owner: AgentId },
}

/// Wall subtest: the uninflated bounding box of the head circle against the edges
#[inline]
pub fn hits_wall(head: Cell, radius: i32, width: usize, height: usize) -> bool {
    head.x - radius < 0
        || head.x + radius > width as i32
        || head.y - radius < 0
        || head.y + radius > height as i32
}

/// Wall subtest for a continuous position on a given grid
#[inline]
pub fn wall_collision(grid: &OccupancyGrid, candidate: Vec2, radius: i32) -> bool {
    hits_wall(Cell::from_position(candidate), radius, grid.width(), grid.height())
}

/// Full collision test, returning the first cause found
pub fn detect(
    grid: &OccupancyGrid,
    history: &TrailHistory,
    candidate: Vec2,
    radius: i32,
) -> Option<Collision> {
    let head = Cell::from_position(candidate);
    if hits_wall(head, radius, grid.width(), grid.height()) {
        return Some(Collision::Wall);
    }

    let reach = 2 * radius;
    let reach_sq = (reach * reach) as f32;
    let window = grid.window(head, reach);

    for cell in window.cells() {
        if history.contains(cell) {
            continue;
        }
        if candidate.distance_sq_to(cell.center()) > reach_sq {
            continue;
        }
        if let Some(owner) = grid.owner(cell) {
            return Some(Collision::Trail { owner });
        }
    }

    None
}

/// Boolean form of [`detect`]
#[inline]
pub fn collision(
    grid: &OccupancyGrid,
    history: &TrailHistory,
    candidate: Vec2,
    radius: i32,
) -> bool {
    detect(grid, history, candidate, radius).is_some()
}

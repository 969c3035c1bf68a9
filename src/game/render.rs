//! Render interface
//!
//! The core never paints. It exposes per-snake [`AgentView`]s and a list of
//! [`DrawCommand`]s in paint order; a window layer replays them onto its
//! surface without touching round state.

use serde::Serialize;

use crate::game::constants::render::{Rgb, BACKGROUND, DRAW_SAFETY_FACTOR, HEAD_COLOR};
use crate::game::constants::palette_color;
use crate::game::grid::{AgentId, Cell, OccupancyGrid, OwnedCell};
use crate::game::round::Round;
use crate::game::snake::Snake;

/// What a renderer needs to know about one snake
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentView {
    pub id: AgentId,
    pub color: Rgb,
    pub alive: bool,
    pub head: Cell,
    pub radius: i32,
    pub in_hole: bool,
    /// Occupied cells around the newest trail cell, only while in a hole
    pub nearby: Option<Vec<OwnedCell>>,
}

/// Single paint operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrawCommand {
    /// Filled circle
    Circle { center: Cell, radius: i32, color: Rgb },
}

fn hole_neighbourhood(snake: &Snake, grid: &OccupancyGrid, radius: i32) -> Vec<OwnedCell> {
    let window = grid.window(snake.history().newest(), DRAW_SAFETY_FACTOR * radius);
    let cells = grid.occupied_in(&window).collect();
    cells
}

pub fn agent_view(snake: &Snake, grid: &OccupancyGrid, radius: i32) -> AgentView {
    let in_hole = snake.in_hole();
    AgentView {
        id: snake.id(),
        color: snake.color(),
        alive: snake.is_alive(),
        head: snake.head(),
        radius,
        in_hole,
        nearby: in_hole.then(|| hole_neighbourhood(snake, grid, radius)),
    }
}

/// Views of every snake in spawn order, corpses included
pub fn views(round: &Round) -> Vec<AgentView> {
    let radius = round.config().snake.radius;
    round
        .snakes()
        .map(|snake| agent_view(snake, round.grid(), radius))
        .collect()
}

/// Paint list for the frame just stepped.
///
/// Per live snake: in a hole, trails around the last head cell are repainted
/// in their owners' colors and the cell itself is cleared to the background;
/// otherwise the last head cell is painted in the snake's color. The current
/// head goes on top. Dead snakes add nothing, their last frame stays on screen.
pub fn draw_commands(round: &Round) -> Vec<DrawCommand> {
    let radius = round.config().snake.radius;
    let owner_color = |owner: AgentId| {
        round
            .snake(owner)
            .map(Snake::color)
            .unwrap_or_else(|| palette_color(owner.saturating_sub(1) as usize))
    };

    let mut commands = Vec::new();
    for snake in round.snakes().filter(|s| s.is_alive()) {
        let last = snake.history().newest();
        if snake.in_hole() {
            commands.extend(
                hole_neighbourhood(snake, round.grid(), radius)
                    .into_iter()
                    .map(|owned| DrawCommand::Circle {
                        center: owned.cell,
                        radius,
                        color: owner_color(owned.owner),
                    }),
            );
            commands.push(DrawCommand::Circle {
                center: last,
                radius,
                color: BACKGROUND,
            });
        } else {
            commands.push(DrawCommand::Circle {
                center: last,
                radius,
                color: snake.color(),
            });
        }
        commands.push(DrawCommand::Circle {
            center: snake.head(),
            radius,
            color: HEAD_COLOR,
        });
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, HoleConfig};
    use crate::game::control::{Fixed, Heading, PressedKeys};
    use crate::util::vec2::Vec2;

    fn round() -> Round {
        let mut config = GameConfig::default();
        config.hole = HoleConfig::disabled();
        config.seed = Some(5);
        Round::new(config).unwrap()
    }

    fn straight() -> Box<Fixed> {
        Box::new(Fixed(Heading::Straight))
    }

    #[test]
    fn test_solid_snake_paints_trail_then_head() {
        let mut round = round();
        round
            .spawn_with_velocity(Vec2::new(100.0, 100.0), Vec2::RIGHT, straight())
            .unwrap();
        round.step(&PressedKeys::new());

        let color = round.snake(1).unwrap().color();
        assert_eq!(
            draw_commands(&round),
            vec![
                DrawCommand::Circle { center: Cell::new(100, 100), radius: 5, color },
                DrawCommand::Circle { center: Cell::new(105, 100), radius: 5, color: HEAD_COLOR },
            ]
        );
    }

    #[test]
    fn test_hole_repaints_neighbours_and_clears_cell() {
        let mut round = round();
        round
            .spawn_with_velocity(Vec2::new(300.0, 300.0), Vec2::new(0.0, 1.0), straight())
            .unwrap();
        round
            .spawn_with_velocity(Vec2::new(100.0, 305.0), Vec2::RIGHT, straight())
            .unwrap();
        let keys = PressedKeys::new();
        for _ in 0..40 {
            round.step(&keys);
        }
        // snake 2 is at x = 280 now; open a hole and step once
        round.snake_mut(2).unwrap().start_hole(5);
        round.step(&keys);

        let view = views(&round).into_iter().find(|v| v.id == 2).unwrap();
        assert!(view.in_hole);
        let nearby = view.nearby.unwrap();
        assert!(!nearby.is_empty());
        assert!(nearby.iter().all(|c| c.owner == 2));

        let commands = draw_commands(&round);
        let background = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Circle { color, .. } if *color == BACKGROUND))
            .unwrap();
        // neighbours come before the clearing circle, head last
        assert!(background >= nearby.len());
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::Circle { color, .. }) if *color == HEAD_COLOR
        ));
    }

    #[test]
    fn test_dead_snake_view_is_kept() {
        let mut round = round();
        round
            .spawn_with_velocity(Vec2::new(8.0, 100.0), Vec2::new(-1.0, 0.0), straight())
            .unwrap();
        round.step(&PressedKeys::new());

        assert!(draw_commands(&round).is_empty());
        let views = views(&round);
        assert_eq!(views.len(), 1);
        assert!(!views[0].alive);
        assert!(!views[0].in_hole);
        assert_eq!(views[0].nearby, None);
    }
}

//! Round result and placement system
//!
//! Ranks snakes once a round is over: survivors first, then whoever died last.

use serde::Serialize;

use crate::game::collision::Collision;
use crate::game::constants::render::Rgb;
use crate::game::grid::AgentId;
use crate::game::round::Round;

/// Round result information
#[derive(Debug, Clone, Serialize)]
pub struct RoundResult {
    /// Sole survivor, if exactly one snake is left
    pub winner: Option<AgentId>,
    pub frames: u64,
    pub seed: u64,
    pub placements: Vec<Placement>,
}

/// Snake placement in round results
#[derive(Debug, Clone, Serialize)]
pub struct Placement {
    pub rank: u32,
    pub snake: AgentId,
    pub color: Rgb,
    pub survived: bool,
    pub died_at: Option<u64>,
    pub cause: Option<Collision>,
    /// Grid cells the snake's trail still covers
    pub trail_cells: usize,
}

/// Determine round result from round state
pub fn determine_result(round: &Round) -> RoundResult {
    let grid = round.grid();
    let mut placements: Vec<Placement> = round
        .slots()
        .iter()
        .map(|slot| {
            let snake = slot.snake();
            Placement {
                rank: 0,
                snake: snake.id(),
                color: snake.color(),
                survived: snake.is_alive(),
                died_at: slot.died_at(),
                cause: snake.cause_of_death(),
                trail_cells: grid.count_owned_by(snake.id()),
            }
        })
        .collect();

    // Sort by: survived (desc), death frame (desc), id (asc)
    placements.sort_by(|a, b| {
        b.survived
            .cmp(&a.survived)
            .then_with(|| b.died_at.cmp(&a.died_at))
            .then_with(|| a.snake.cmp(&b.snake))
    });

    for (i, placement) in placements.iter_mut().enumerate() {
        placement.rank = (i + 1) as u32;
    }

    let survivors = placements.iter().filter(|p| p.survived).count();
    let winner = match placements.first() {
        Some(first) if survivors == 1 => Some(first.snake),
        _ => None,
    };

    RoundResult {
        winner,
        frames: round.frame(),
        seed: round.seed(),
        placements,
    }
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
        config.seed = Some(3);
        Round::new(config).unwrap()
    }

    fn straight() -> Box<Fixed> {
        Box::new(Fixed(Heading::Straight))
    }

    #[test]
    fn test_ranking_by_death_order() {
        let mut round = round();
        // 1 dies on frame 1, 2 on frame 3, 3 keeps going
        round
            .spawn_with_velocity(Vec2::new(8.0, 100.0), Vec2::new(-1.0, 0.0), straight())
            .unwrap();
        round
            .spawn_with_velocity(Vec2::new(17.0, 300.0), Vec2::new(-1.0, 0.0), straight())
            .unwrap();
        round
            .spawn_with_velocity(Vec2::new(500.0, 500.0), Vec2::RIGHT, straight())
            .unwrap();
        let keys = PressedKeys::new();
        for _ in 0..3 {
            round.step(&keys);
        }

        let result = round.result();
        assert_eq!(result.winner, Some(3));
        assert_eq!(result.frames, 3);
        assert_eq!(result.seed, 3);
        let order: Vec<_> = result.placements.iter().map(|p| p.snake).collect();
        assert_eq!(order, vec![3, 2, 1]);
        let ranks: Vec<_> = result.placements.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(result.placements[1].died_at, Some(3));
        assert_eq!(result.placements[2].cause, Some(Collision::Wall));
        assert_eq!(result.placements[0].trail_cells, 3);
    }

    #[test]
    fn test_no_winner_when_several_survive() {
        let mut round = round();
        round.spawn(Vec2::new(300.0, 300.0), straight()).unwrap();
        round.spawn(Vec2::new(600.0, 300.0), straight()).unwrap();
        round.step(&PressedKeys::new());

        let result = round.result();
        assert_eq!(result.winner, None);
        assert!(result.placements.iter().all(|p| p.survived));
        // ties broken by id
        assert_eq!(result.placements[0].snake, 1);
    }

    #[test]
    fn test_result_serializes() {
        let mut round = round();
        round.spawn(Vec2::new(300.0, 300.0), straight()).unwrap();
        let json = serde_json::to_string(&round.result()).unwrap();
        assert!(json.contains("\"placements\""));
    }
}

//! Round orchestration
//!
//! A round owns the shared occupancy grid and every snake with its heading
//! source. Snakes are stepped one after another in spawn order, so an earlier
//! snake's grid write is visible to a later snake's collision check within
//! the same frame.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::info;

use crate::config::{ConfigError, GameConfig};
use crate::game::collision::{self, Collision};
use crate::game::constants::{palette_color, snake::MAX_AGENTS};
use crate::game::control::{ControlContext, HeadingSource, KeyState};
use crate::game::grid::{AgentId, Cell, OccupancyGrid};
use crate::game::round_result::{self, RoundResult};
use crate::game::snake::Snake;
use crate::util::vec2::Vec2;

/// Round setup errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoundError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Round already holds the maximum of {0} snakes")]
    RosterFull(usize),
    #[error("Spawn position ({x}, {y}) is not inside the arena walls")]
    SpawnOutsideArena { x: f32, y: f32 },
    #[error("Spawn velocity must be non-zero and finite")]
    InvalidVelocity,
}

/// A death recorded during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Death {
    pub snake: AgentId,
    pub frame: u64,
    pub cause: Collision,
}

/// Outcome of one [`Round::step`]
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub frame: u64,
    /// Deaths in update order
    pub deaths: SmallVec<[Death; 4]>,
    /// Snakes still alive after the frame
    pub alive: usize,
}

/// A snake together with whatever steers it
pub struct SnakeSlot {
    snake: Snake,
    controller: Box<dyn HeadingSource>,
    died_at: Option<u64>,
}

impl SnakeSlot {
    #[inline]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Frame on which the snake died
    #[inline]
    pub fn died_at(&self) -> Option<u64> {
        self.died_at
    }
}

pub struct Round {
    config: GameConfig,
    grid: OccupancyGrid,
    slots: Vec<SnakeSlot>,
    rng: StdRng,
    seed: u64,
    frame: u64,
}

impl Round {
    /// Empty round; the RNG is seeded from the config or randomly
    pub fn new(config: GameConfig) -> Result<Self, RoundError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            grid: OccupancyGrid::new(config.arena.width, config.arena.height),
            slots: Vec::with_capacity(MAX_AGENTS),
            rng: StdRng::seed_from_u64(seed),
            seed,
            frame: 0,
            config,
        })
    }

    /// Classic three-snake roster: spawns at 1/8, 1/2 and 1/3 of the arena
    pub fn standard(
        config: GameConfig,
        controllers: [Box<dyn HeadingSource>; 3],
    ) -> Result<Self, RoundError> {
        let mut round = Self::new(config)?;
        let w = round.config.arena.width as f32;
        let h = round.config.arena.height as f32;
        let spawns = [
            Vec2::new(w / 8.0, h / 8.0),
            Vec2::new(w / 2.0, h / 2.0),
            Vec2::new(w / 3.0, h / 3.0),
        ];
        for (position, controller) in spawns.into_iter().zip(controllers) {
            round.spawn(position, controller)?;
        }
        Ok(round)
    }

    /// Add a snake with the configured initial velocity
    pub fn spawn(
        &mut self,
        position: Vec2,
        controller: Box<dyn HeadingSource>,
    ) -> Result<AgentId, RoundError> {
        let velocity = self.config.snake.initial_velocity;
        self.spawn_with_velocity(position, velocity, controller)
    }

    /// Add a snake moving along `velocity` (only the direction matters)
    pub fn spawn_with_velocity(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        controller: Box<dyn HeadingSource>,
    ) -> Result<AgentId, RoundError> {
        if self.slots.len() >= MAX_AGENTS {
            return Err(RoundError::RosterFull(MAX_AGENTS));
        }
        let radius = self.config.snake.radius;
        if !position.is_finite()
            || collision::hits_wall(
                Cell::from_position(position),
                radius,
                self.grid.width(),
                self.grid.height(),
            )
        {
            return Err(RoundError::SpawnOutsideArena {
                x: position.x,
                y: position.y,
            });
        }
        if !velocity.is_finite() || velocity.length_sq() == 0.0 {
            return Err(RoundError::InvalidVelocity);
        }

        let index = self.slots.len();
        let id = (index + 1) as AgentId;
        let snake = Snake::new(
            id,
            palette_color(index),
            position,
            velocity,
            self.config.snake.history_len,
        );
        self.slots.push(SnakeSlot {
            snake,
            controller,
            died_at: None,
        });
        info!(snake = id, x = position.x, y = position.y, "snake spawned");
        Ok(id)
    }

    /// Run one frame: every live snake decides, moves and is judged, in spawn order
    pub fn step(&mut self, keys: &dyn KeyState) -> FrameReport {
        self.frame += 1;
        let mut report = FrameReport {
            frame: self.frame,
            ..FrameReport::default()
        };

        for slot in self.slots.iter_mut() {
            if !slot.snake.is_alive() {
                continue;
            }

            let heading = slot.controller.decide(&ControlContext {
                snake: &slot.snake,
                grid: &self.grid,
                keys,
                config: &self.config,
            });
            slot.snake.steer(heading, self.config.snake.turn_angle);

            if let Some(cause) = slot.snake.update(&mut self.grid, &mut self.rng, &self.config) {
                slot.died_at = Some(self.frame);
                info!(snake = slot.snake.id(), frame = self.frame, cause = ?cause, "snake died");
                report.deaths.push(Death {
                    snake: slot.snake.id(),
                    frame: self.frame,
                    cause,
                });
            }
        }

        report.alive = self.alive_count();
        report
    }

    /// Whether the round has nothing left to play
    pub fn is_over(&self) -> bool {
        let alive = self.alive_count();
        let last_standing = self.slots.len() >= 2 && alive <= 1;
        let out_of_time = self
            .config
            .max_frames
            .is_some_and(|max| self.frame >= max);
        alive == 0 || last_standing || out_of_time
    }

    pub fn result(&self) -> RoundResult {
        round_result::determine_result(self)
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    #[inline]
    pub fn slots(&self) -> &[SnakeSlot] {
        &self.slots
    }

    pub fn snakes(&self) -> impl Iterator<Item = &Snake> {
        self.slots.iter().map(|slot| &slot.snake)
    }

    pub fn snake(&self, id: AgentId) -> Option<&Snake> {
        self.snakes().find(|s| s.id() == id)
    }

    pub fn snake_mut(&mut self, id: AgentId) -> Option<&mut Snake> {
        self.slots
            .iter_mut()
            .map(|slot| &mut slot.snake)
            .find(|s| s.id() == id)
    }

    pub fn alive_count(&self) -> usize {
        self.snakes().filter(|s| s.is_alive()).count()
    }
}

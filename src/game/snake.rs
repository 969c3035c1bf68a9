//! Snake state machine
//!
//! A snake is `Solid` (drawing its trail), in a `Hole` (trail gap, immune to
//! trail collisions but not to walls) or `Dead`. Each frame [`Snake::update`]
//! rolls for a hole, records the current head in the trail history, moves,
//! asks the collision engine for a verdict and finally claims its grid cell.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::config::{GameConfig, HoleConfig};
use crate::game::collision::{self, Collision};
use crate::game::constants::render::Rgb;
use crate::game::control::Heading;
use crate::game::grid::{AgentId, Cell, OccupancyGrid};
use crate::game::trail::TrailHistory;
use crate::util::vec2::Vec2;

/// Observable state of a snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SnakeState {
    /// Trail being drawn, collisions checked
    Solid,
    /// Passing through a gap for `remaining` more frames
    Hole { remaining: u32 },
    /// Terminal
    Dead,
}

#[derive(Debug, Clone)]
pub struct Snake {
    position: Vec2,
    velocity: Vec2,
    /// Rotation applied to the velocity on the next update (radians)
    turn: f32,
    alive: bool,
    /// 0 = solid, >0 = frames of hole left
    hole_timer: u32,
    history: TrailHistory,
    cause_of_death: Option<Collision>,

    id: AgentId,
    color: Rgb,
}

impl Snake {
    /// Fresh snake with its own history pre-filled with the spawn cell.
    ///
    /// `velocity` must be non-zero; it is rescaled to the configured speed on
    /// the first update.
    pub fn new(id: AgentId, color: Rgb, spawn: Vec2, velocity: Vec2, history_len: usize) -> Self {
        debug_assert!(velocity.length_sq() > 0.0, "snake velocity must be non-zero");
        Self {
            position: spawn,
            velocity,
            turn: 0.0,
            alive: true,
            hole_timer: 0,
            history: TrailHistory::new(history_len, spawn),
            cause_of_death: None,
            id,
            color,
        }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Rounded head position
    #[inline]
    pub fn head(&self) -> Cell {
        Cell::from_position(self.position)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn hole_timer(&self) -> u32 {
        self.hole_timer
    }

    #[inline]
    pub fn in_hole(&self) -> bool {
        self.alive && self.hole_timer > 0
    }

    #[inline]
    pub fn history(&self) -> &TrailHistory {
        &self.history
    }

    /// What killed the snake, if it is dead
    #[inline]
    pub fn cause_of_death(&self) -> Option<Collision> {
        self.cause_of_death
    }

    pub fn state(&self) -> SnakeState {
        match (self.alive, self.hole_timer) {
            (false, _) => SnakeState::Dead,
            (true, 0) => SnakeState::Solid,
            (true, remaining) => SnakeState::Hole { remaining },
        }
    }

    /// Set the heading for the next update
    pub fn steer(&mut self, heading: Heading, turn_angle: f32) {
        self.turn = heading.angle(turn_angle);
    }

    /// Force a hole of `frames` frames, replacing any running one
    pub fn start_hole(&mut self, frames: u32) {
        self.hole_timer = frames;
    }

    fn roll_hole<R: Rng + ?Sized>(&mut self, rng: &mut R, hole: &HoleConfig) {
        if self.hole_timer != 0 || !hole.enabled() {
            return;
        }
        if rng.gen_ratio(1, hole.chance_denominator) {
            self.hole_timer = rng.gen_range(hole.min_frames..=hole.max_frames);
            debug!(snake = self.id, frames = self.hole_timer, "hole opened");
        }
    }

    fn kill(&mut self, cause: Collision) {
        self.alive = false;
        self.cause_of_death = Some(cause);
    }

    /// Advance one frame. Returns the collision when the snake died this frame.
    ///
    /// Dead snakes are left untouched.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        grid: &mut OccupancyGrid,
        rng: &mut R,
        config: &GameConfig,
    ) -> Option<Collision> {
        if !self.alive {
            return None;
        }
        let radius = config.snake.radius;

        self.roll_hole(rng, &config.hole);

        // before moving, so the next exemption window covers the current cell
        self.history.push(self.position);

        self.velocity.rotate(self.turn);
        self.velocity.normalize_to(config.snake.speed);
        self.position += self.velocity;

        if self.hole_timer == 0 {
            if let Some(cause) = collision::detect(grid, &self.history, self.position, radius) {
                self.kill(cause);
                return Some(cause);
            }
            grid.claim(self.head(), self.id);
        } else {
            if collision::wall_collision(grid, self.position, radius) {
                self.kill(Collision::Wall);
                return Some(Collision::Wall);
            }
            self.hole_timer -= 1;
            if self.hole_timer == 0 {
                debug!(snake = self.id, "hole closed");
            }
        }

        None
    }
}

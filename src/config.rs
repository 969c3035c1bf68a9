//! Game configuration
//!
//! Every tunable of a round lives here. Defaults are the classic values from
//! [`crate::game::constants`]; each can be overridden once at startup through
//! environment variables (a `.env` file is honoured by the binary).

use std::str::FromStr;

use serde::Serialize;

use crate::game::constants::{arena, hole, snake, timing, trail};
use crate::util::vec2::Vec2;

/// Arena dimensions (also the occupancy grid dimensions)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArenaConfig {
    pub width: usize,
    pub height: usize,
}

/// Per-snake motion parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnakeConfig {
    /// Head radius in cells
    pub radius: i32,
    /// Turn increment per frame in radians
    pub turn_angle: f32,
    /// Distance travelled per frame
    pub speed: f32,
    /// Length of the self-collision exemption history
    pub history_len: usize,
    /// Velocity given to snakes spawned without an explicit one
    pub initial_velocity: Vec2,
}

/// Trail gap parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoleConfig {
    /// A hole starts with probability 1 / chance_denominator; 0 disables holes
    pub chance_denominator: u32,
    pub min_frames: u32,
    pub max_frames: u32,
}

impl HoleConfig {
    /// Configuration that never opens a hole
    pub fn disabled() -> Self {
        Self {
            chance_denominator: 0,
            ..Self::default()
        }
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.chance_denominator > 0
    }
}

impl Default for HoleConfig {
    fn default() -> Self {
        Self {
            chance_denominator: hole::CHANCE_DENOMINATOR,
            min_frames: hole::MIN_FRAMES,
            max_frames: hole::MAX_FRAMES,
        }
    }
}

/// Complete round configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    pub snake: SnakeConfig,
    pub hole: HoleConfig,
    /// Frames per second of the frame clock
    pub frame_rate: u32,
    /// Seed for the round RNG; a random seed is drawn when absent
    pub seed: Option<u64>,
    /// Hard stop for headless rounds
    pub max_frames: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig {
                width: arena::WIDTH,
                height: arena::HEIGHT,
            },
            snake: SnakeConfig {
                radius: snake::RADIUS,
                turn_angle: snake::TURN_ANGLE,
                speed: snake::SPEED,
                history_len: trail::HISTORY_LEN,
                initial_velocity: Vec2::new(snake::INITIAL_VELOCITY.0, snake::INITIAL_VELOCITY.1),
            },
            hole: HoleConfig::default(),
            frame_rate: timing::FPS,
            seed: None,
            max_frames: None,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Arena must have non-zero dimensions, got {width}x{height}")]
    EmptyArena { width: usize, height: usize },
    #[error("Arena {width}x{height} cannot fit a snake of radius {radius}")]
    ArenaTooSmall {
        width: usize,
        height: usize,
        radius: i32,
    },
    #[error("Snake radius must be positive, got {0}")]
    InvalidRadius(i32),
    #[error("Snake speed must be a positive finite number, got {0}")]
    InvalidSpeed(f32),
    #[error("Turn angle must be finite, got {0}")]
    InvalidTurnAngle(f32),
    #[error("Initial velocity must be non-zero and finite")]
    InvalidInitialVelocity,
    #[error("Trail history length must be at least 1")]
    EmptyHistory,
    #[error("Hole duration range {min}..={max} is empty")]
    InvalidHoleRange { min: u32, max: u32 },
    #[error("Frame rate must be at least 1")]
    ZeroFrameRate,
}

impl GameConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup on top of the defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        override_from(&lookup, "ARENA_WIDTH", &mut config.arena.width);
        override_from(&lookup, "ARENA_HEIGHT", &mut config.arena.height);

        override_from(&lookup, "SNAKE_RADIUS", &mut config.snake.radius);
        override_from(&lookup, "SNAKE_SPEED", &mut config.snake.speed);
        override_from(&lookup, "TRAIL_HISTORY", &mut config.snake.history_len);

        let mut turn_degrees = config.snake.turn_angle.to_degrees();
        if override_from(&lookup, "TURN_DEGREES", &mut turn_degrees) {
            config.snake.turn_angle = turn_degrees.to_radians();
        }

        override_from(&lookup, "HOLE_CHANCE", &mut config.hole.chance_denominator);
        override_from(&lookup, "HOLE_MIN_FRAMES", &mut config.hole.min_frames);
        override_from(&lookup, "HOLE_MAX_FRAMES", &mut config.hole.max_frames);

        override_from(&lookup, "FPS", &mut config.frame_rate);

        let mut seed = 0u64;
        if override_from(&lookup, "ROUND_SEED", &mut seed) {
            config.seed = Some(seed);
        }
        let mut max_frames = 0u64;
        if override_from(&lookup, "MAX_FRAMES", &mut max_frames) {
            config.max_frames = Some(max_frames);
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ArenaConfig { width, height } = self.arena;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyArena { width, height });
        }
        if self.snake.radius <= 0 {
            return Err(ConfigError::InvalidRadius(self.snake.radius));
        }
        let diameter = 2 * self.snake.radius as usize;
        if width <= diameter || height <= diameter {
            return Err(ConfigError::ArenaTooSmall {
                width,
                height,
                radius: self.snake.radius,
            });
        }
        if !(self.snake.speed.is_finite() && self.snake.speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.snake.speed));
        }
        if !self.snake.turn_angle.is_finite() {
            return Err(ConfigError::InvalidTurnAngle(self.snake.turn_angle));
        }
        let v = self.snake.initial_velocity;
        if !v.is_finite() || v.length_sq() == 0.0 {
            return Err(ConfigError::InvalidInitialVelocity);
        }
        if self.snake.history_len == 0 {
            return Err(ConfigError::EmptyHistory);
        }
        if self.hole.enabled()
            && (self.hole.min_frames == 0 || self.hole.min_frames > self.hole.max_frames)
        {
            return Err(ConfigError::InvalidHoleRange {
                min: self.hole.min_frames,
                max: self.hole.max_frames,
            });
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(())
    }
}

/// Parse `key` into `slot` when present; keeps the default and warns otherwise.
/// Returns true when the slot was overwritten.
fn override_from<F, T>(lookup: &F, key: &str, slot: &mut T) -> bool
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return false;
    };
    match raw.trim().parse::<T>() {
        Ok(parsed) => {
            *slot = parsed;
            true
        }
        Err(_) => {
            tracing::warn!("Invalid {} '{}', using default", key, raw);
            false
        }
    }
}

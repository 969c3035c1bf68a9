//! Heading control
//!
//! A snake decides nothing on its own: each frame some [`HeadingSource`]
//! picks one of three headings and the snake moves accordingly. Human
//! players are a [`KeyBinding`] over the frame's key state, headless rounds
//! use [`Wanderer`] bots.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::game::collision;
use crate::game::constants::bot::*;
use crate::game::grid::{Cell, OccupancyGrid};
use crate::game::snake::Snake;

/// Per-frame turn decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heading {
    /// Counter-clockwise by the turn angle
    Left,
    #[default]
    Straight,
    /// Clockwise by the turn angle
    Right,
}

impl Heading {
    pub const ALL: [Heading; 3] = [Heading::Straight, Heading::Left, Heading::Right];

    /// Rotation applied to the velocity this frame
    #[inline]
    pub fn angle(self, turn_angle: f32) -> f32 {
        match self {
            Heading::Left => turn_angle,
            Heading::Straight => 0.0,
            Heading::Right => -turn_angle,
        }
    }

    /// Neither or both keys held means straight
    pub fn from_keys(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Heading::Left,
            (false, true) => Heading::Right,
            _ => Heading::Straight,
        }
    }
}

/// Keyboard keys a binding can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

/// Key-down query supplied by the input layer
pub trait KeyState {
    fn is_pressed(&self, key: Key) -> bool;
}

/// Snapshot of the keys held during one frame
#[derive(Debug, Clone, Default)]
pub struct PressedKeys {
    keys: HashSet<Key>,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

impl KeyState for PressedKeys {
    fn is_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }
}

impl FromIterator<Key> for PressedKeys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// Everything a heading source may look at
pub struct ControlContext<'a> {
    pub snake: &'a Snake,
    pub grid: &'a OccupancyGrid,
    pub keys: &'a dyn KeyState,
    pub config: &'a GameConfig,
}

/// Strategy supplying a heading every frame
pub trait HeadingSource {
    fn decide(&mut self, ctx: &ControlContext<'_>) -> Heading;
}

/// Two-key human control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub left: Key,
    pub right: Key,
}

impl KeyBinding {
    pub const fn new(left: Key, right: Key) -> Self {
        Self { left, right }
    }

    pub fn heading(&self, keys: &dyn KeyState) -> Heading {
        Heading::from_keys(keys.is_pressed(self.left), keys.is_pressed(self.right))
    }
}

/// Classic bindings of the three-player roster
pub const CLASSIC_BINDINGS: [KeyBinding; 3] = [
    KeyBinding::new(Key::Char('A'), Key::Char('D')),
    KeyBinding::new(Key::ArrowLeft, Key::ArrowRight),
    KeyBinding::new(Key::Char('M'), Key::Char('N')),
];

impl HeadingSource for KeyBinding {
    fn decide(&mut self, ctx: &ControlContext<'_>) -> Heading {
        self.heading(ctx.keys)
    }
}

/// Always the same heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixed(pub Heading);

impl HeadingSource for Fixed {
    fn decide(&mut self, _ctx: &ControlContext<'_>) -> Heading {
        self.0
    }
}

/// Seeded bot: holds random headings for a while and swerves away from
/// walls and trails it can see coming.
#[derive(Debug, Clone)]
pub struct Wanderer {
    rng: StdRng,
    held: Heading,
    hold_frames: u32,
}

impl Wanderer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            held: Heading::Straight,
            hold_frames: 0,
        }
    }

    fn next_preference(&mut self) -> Heading {
        if self.hold_frames == 0 {
            self.held = if self.rng.gen_bool(TURN_PROBABILITY) {
                if self.rng.gen_bool(0.5) {
                    Heading::Left
                } else {
                    Heading::Right
                }
            } else {
                Heading::Straight
            };
            self.hold_frames = self.rng.gen_range(MIN_HOLD_FRAMES..=MAX_HOLD_FRAMES);
        }
        self.hold_frames -= 1;
        self.held
    }
}

/// Number of frames the snake survives holding `heading`, up to the lookahead
fn clear_frames(ctx: &ControlContext<'_>, heading: Heading) -> u32 {
    let snake = &ctx.config.snake;
    let angle = heading.angle(snake.turn_angle);
    let mut velocity = ctx.snake.velocity();
    let mut position = ctx.snake.position();

    for step in 1..=LOOKAHEAD_FRAMES {
        velocity.rotate(angle);
        velocity.normalize_to(snake.speed);
        position += velocity;

        if collision::wall_collision(ctx.grid, position, snake.radius) {
            return step - 1;
        }
        if step >= TRAIL_PROBE_FROM {
            let window = ctx.grid.window(Cell::from_position(position), snake.radius);
            if ctx.grid.occupied_in(&window).next().is_some() {
                return step - 1;
            }
        }
    }
    LOOKAHEAD_FRAMES
}

impl HeadingSource for Wanderer {
    fn decide(&mut self, ctx: &ControlContext<'_>) -> Heading {
        let preferred = self.next_preference();
        if clear_frames(ctx, preferred) == LOOKAHEAD_FRAMES {
            return preferred;
        }

        // pick whichever heading keeps us alive longest
        let best = Heading::ALL
            .into_iter()
            .max_by_key(|&h| clear_frames(ctx, h))
            .unwrap_or(preferred);
        if best != preferred {
            self.held = best;
        }
        best
    }
}

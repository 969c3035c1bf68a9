//! Achtung Game Core
//!
//! Simulation core of a multi-agent trail game: snakes move at constant
//! speed, leave a permanent trail on an occupancy grid and die on touching a
//! wall or any trail, their own included. Periodic holes let a snake pass
//! through trails for a few frames.
//!
//! The core is headless. Rendering is exposed as views and draw commands
//! (see [`game::render`]), input as a pluggable [`game::control::HeadingSource`].

pub mod config;
pub mod game;
pub mod util;

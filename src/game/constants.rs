/// Arena constants
pub mod arena {
    /// Playfield width in grid cells (one cell per pixel)
    pub const WIDTH: usize = 1080;
    /// Playfield height in grid cells
    pub const HEIGHT: usize = 900;
}

/// Snake motion constants
pub mod snake {
    /// Radius of the drawn snake head, in cells
    pub const RADIUS: i32 = 5;
    /// Turn increment per frame while a turn key is held (10 degrees)
    pub const TURN_ANGLE: f32 = 10.0 * std::f32::consts::PI / 180.0;
    /// Distance covered per frame
    pub const SPEED: f32 = 4.5;
    /// Velocity every snake starts with before the first normalisation
    pub const INITIAL_VELOCITY: (f32, f32) = (3.0, 3.0);
    /// Most snakes a single round can hold (grid owners are stored as `u8`)
    pub const MAX_AGENTS: usize = 6;
}

/// Trail history constants
pub mod trail {
    /// Number of most recent head cells exempt from self-collision
    pub const HISTORY_LEN: usize = 5;
}

/// Hole (gap in the trail) constants
pub mod hole {
    /// A hole starts with probability 1 / CHANCE_DENOMINATOR per solid frame
    pub const CHANCE_DENOMINATOR: u32 = 40;
    /// Shortest hole, in frames
    pub const MIN_FRAMES: u32 = 8;
    /// Longest hole, in frames
    pub const MAX_FRAMES: u32 = 12;
}

/// Frame pacing constants
pub mod timing {
    /// Target frame rate
    pub const FPS: u32 = 60;
    /// Rolling window of frame samples kept by the frame monitor (~2s at 60 FPS)
    pub const MONITOR_SAMPLES: usize = 120;
}

/// Colors and paint constants consumed by the renderer
pub mod render {
    /// RGB triple
    pub type Rgb = (u8, u8, u8);

    pub const BACKGROUND: Rgb = (59, 59, 64);
    pub const HEAD_COLOR: Rgb = (254, 255, 1);

    /// Trail colors, indexed by spawn order
    pub const PALETTE: [Rgb; super::snake::MAX_AGENTS] = [
        (255, 0, 0),
        (0, 255, 0),
        (128, 0, 128),
        (0, 128, 255),
        (255, 140, 0),
        (0, 220, 220),
    ];

    /// Repaint window around a hole, as a multiple of the snake radius
    pub const DRAW_SAFETY_FACTOR: i32 = 2;
}

/// Palette color for the n-th spawned snake (wraps around)
#[inline]
pub fn palette_color(index: usize) -> render::Rgb {
    render::PALETTE[index % render::PALETTE.len()]
}

/// Headless bot constants
pub mod bot {
    /// Frames simulated ahead when judging whether a heading is safe
    pub const LOOKAHEAD_FRAMES: u32 = 12;
    /// Lookahead steps closer than this are skipped for the trail probe,
    /// the head's own fresh cells live there
    pub const TRAIL_PROBE_FROM: u32 = 3;
    /// Shortest time a wandering bot keeps a chosen heading
    pub const MIN_HOLD_FRAMES: u32 = 4;
    /// Longest time a wandering bot keeps a chosen heading
    pub const MAX_HOLD_FRAMES: u32 = 24;
    /// Chance that a fresh heading choice is a turn rather than straight
    pub const TURN_PROBABILITY: f64 = 0.45;
}

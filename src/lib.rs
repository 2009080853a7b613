//! Side Runner - A side-scrolling runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, physics, collisions, game state)
//! - `renderer`: Draw list and vertex generation for hosts
//! - `platform`: Clock, input mapping and the frame driver
//! - `tuning`: Data-driven game balance
//! - `settings`: Display preferences
//! - `highscores`: Per-session run board

pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::SessionScores;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// These are the defaults behind [`Tuning`]. Units are pixels and seconds.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Largest frame delta the driver will simulate (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Logical play area
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 400.0;
    pub const GROUND_HEIGHT: f32 = 60.0;
    /// Top surface of the ground band
    pub const GROUND_TOP: f32 = SCREEN_HEIGHT - GROUND_HEIGHT;
    /// Guaranteed terrain span kept ahead of (and behind) the player
    pub const LOOKAHEAD: f32 = 200.0;

    /// Player body - horizontal position never changes, the world scrolls
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const CROUCH_HEIGHT: f32 = 25.0;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 2400.0;
    /// Upward launch velocity (negative is up)
    pub const JUMP_IMPULSE: f32 = -900.0;
    /// Downward velocity applied when diving
    pub const DIVE_IMPULSE: f32 = 700.0;

    /// Scroll speed ramp (pixels/s, pixels/s²)
    pub const SCROLL_SPEED: f32 = 300.0;
    pub const SCROLL_ACCEL: f32 = 3.6;
    pub const MAX_SCROLL_SPEED: f32 = 720.0;
    /// Birds fly into the player slightly faster than the ground scrolls
    pub const BIRD_SPEED_FACTOR: f32 = 1.2;

    /// Spawn cadences in ticks
    pub const OBSTACLE_INTERVAL_TICKS: u32 = 90;
    pub const BIRD_INTERVAL_TICKS: u32 = 180;
    pub const SCENERY_INTERVAL_TICKS: u32 = 120;
    pub const GROUND_CHECK_INTERVAL_TICKS: u32 = 15;

    /// Ground segment length range
    pub const GROUND_SEGMENT_MIN: f32 = 200.0;
    pub const GROUND_SEGMENT_MAX: f32 = 600.0;

    /// Clearance at the base of gapped tunnels and hills
    pub const TUNNEL_GAP_HEIGHT: f32 = 35.0;
    pub const HILL_GAP_HEIGHT: f32 = 35.0;
}

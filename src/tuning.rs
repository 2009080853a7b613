//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives in [`Tuning`]. Defaults
//! come from [`crate::consts`]; a JSON file may override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading tuning overrides
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay parameters for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play area ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub ground_top: f32,
    pub lookahead: f32,

    // === Player ===
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub crouch_height: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub dive_impulse: f32,

    // === Scrolling ===
    pub scroll_speed: f32,
    pub scroll_accel: f32,
    pub max_scroll_speed: f32,
    pub bird_speed_factor: f32,

    // === Spawning ===
    pub obstacle_interval_ticks: u32,
    pub bird_interval_ticks: u32,
    pub scenery_interval_ticks: u32,
    pub ground_check_interval_ticks: u32,
    /// Flying obstacles from the classic runner
    pub birds_enabled: bool,
    pub ground_segment_min: f32,
    pub ground_segment_max: f32,
    pub tunnel_gap_height: f32,
    pub hill_gap_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_top: GROUND_TOP,
            lookahead: LOOKAHEAD,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            crouch_height: CROUCH_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            dive_impulse: DIVE_IMPULSE,

            scroll_speed: SCROLL_SPEED,
            scroll_accel: SCROLL_ACCEL,
            max_scroll_speed: MAX_SCROLL_SPEED,
            bird_speed_factor: BIRD_SPEED_FACTOR,

            obstacle_interval_ticks: OBSTACLE_INTERVAL_TICKS,
            bird_interval_ticks: BIRD_INTERVAL_TICKS,
            scenery_interval_ticks: SCENERY_INTERVAL_TICKS,
            ground_check_interval_ticks: GROUND_CHECK_INTERVAL_TICKS,
            birds_enabled: true,
            ground_segment_min: GROUND_SEGMENT_MIN,
            ground_segment_max: GROUND_SEGMENT_MAX,
            tunnel_gap_height: TUNNEL_GAP_HEIGHT,
            hill_gap_height: HILL_GAP_HEIGHT,
        }
    }
}

impl Tuning {
    /// Height of the ground band below `ground_top`
    pub fn ground_height(&self) -> f32 {
        self.screen_height - self.ground_top
    }

    /// Parse overrides from JSON (missing fields keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load overrides from a JSON file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: &str| Err(TuningError::Invalid(msg.to_string()));

        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return invalid("screen dimensions must be positive");
        }
        if self.ground_top <= 0.0 || self.ground_top >= self.screen_height {
            return invalid("ground_top must lie inside the screen");
        }
        if self.crouch_height <= 0.0 || self.crouch_height > self.player_height {
            return invalid("crouch_height must be in (0, player_height]");
        }
        if self.gravity <= 0.0 {
            return invalid("gravity must pull downward");
        }
        if self.jump_impulse >= 0.0 {
            return invalid("jump_impulse must be negative (upward)");
        }
        if self.dive_impulse <= 0.0 {
            return invalid("dive_impulse must be positive (downward)");
        }
        if self.lookahead < 0.0 {
            return invalid("lookahead must not be negative");
        }
        if self.tunnel_gap_height <= self.crouch_height || self.hill_gap_height <= self.crouch_height {
            return invalid("gap heights must exceed crouch_height");
        }
        if self.bird_speed_factor <= 1.0 {
            return invalid("bird_speed_factor must be greater than 1");
        }
        if self.scroll_speed < 0.0 || self.max_scroll_speed < self.scroll_speed {
            return invalid("scroll speeds must satisfy 0 <= scroll_speed <= max_scroll_speed");
        }
        if self.ground_segment_min <= 0.0 || self.ground_segment_max < self.ground_segment_min {
            return invalid("ground segment range must be positive and ordered");
        }
        if self.obstacle_interval_ticks == 0
            || self.bird_interval_ticks == 0
            || self.scenery_interval_ticks == 0
            || self.ground_check_interval_ticks == 0
        {
            return invalid("spawn intervals must be at least one tick");
        }
        Ok(())
    }
}

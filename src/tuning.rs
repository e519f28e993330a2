//! Game balance tuning
//!
//! Every field defaults to the matching constant in [`crate::consts`]. A JSON
//! file only needs the keys it wants to override.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Runtime-tunable gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    pub starting_lives: i32,

    // === Ship ===
    pub ship_radius: f32,
    pub ship_collision_radius: f32,
    pub ship_weight: f32,
    pub ship_thrust: f32,
    pub ship_rotate_speed: f32,
    pub ship_fire_rate: f32,

    // === Progression ===
    pub starting_exp: u32,
    pub starting_exp_to_level: u32,
    pub exp_to_level_step: u32,
    pub invulnerable_blinks: u32,
    pub blink_frames: u32,

    // === Boosts ===
    pub weight_boost: f32,
    pub thrust_boost: f32,
    pub fire_rate_divisor: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_collision_radius: f32,
    pub bullet_size: f32,
    /// Remove bullets that leave the arena. Off reproduces unbounded growth.
    pub cull_offscreen_bullets: bool,

    // === Asteroids ===
    pub asteroids_per_wave: usize,
    pub asteroid_speed: f32,
    pub restart_speed_bonus: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,

            ship_radius: SHIP_RADIUS,
            ship_collision_radius: SHIP_COLLISION_RADIUS,
            ship_weight: SHIP_WEIGHT,
            ship_thrust: SHIP_THRUST,
            ship_rotate_speed: SHIP_ROTATE_SPEED,
            ship_fire_rate: SHIP_FIRE_RATE,

            starting_exp: STARTING_EXP,
            starting_exp_to_level: STARTING_EXP_TO_LEVEL,
            exp_to_level_step: EXP_TO_LEVEL_STEP,
            invulnerable_blinks: INVULNERABLE_BLINKS,
            blink_frames: BLINK_FRAMES,

            weight_boost: WEIGHT_BOOST,
            thrust_boost: THRUST_BOOST,
            fire_rate_divisor: FIRE_RATE_DIVISOR,

            bullet_speed: BULLET_SPEED,
            bullet_collision_radius: BULLET_COLLISION_RADIUS,
            bullet_size: BULLET_SIZE,
            cull_offscreen_bullets: true,

            asteroids_per_wave: ASTEROIDS_PER_WAVE,
            asteroid_speed: ASTEROID_SPEED,
            restart_speed_bonus: RESTART_SPEED_BONUS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Speed of asteroids spawned after the arena has been cleared
    pub fn restart_asteroid_speed(&self) -> f32 {
        self.asteroid_speed + self.restart_speed_bonus
    }

    /// Read tuning from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read tuning from a JSON file, falling back to defaults on any failure
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({})", e);
                Self::default()
            }
        }
    }
}

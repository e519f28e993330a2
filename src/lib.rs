//! Asteroid Drift - an arena asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, progression)
//! - `renderer`: Frame drawing through the render-surface interface
//! - `platform`: Host collaborator interfaces (input, drawing, boost buttons)
//! - `persistence`: Key-value stores for the high score
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Lives at session start
    pub const STARTING_LIVES: i32 = 3;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 15.0;
    pub const SHIP_COLLISION_RADIUS: f32 = 11.0;
    pub const SHIP_WEIGHT: f32 = 0.99;
    pub const SHIP_THRUST: f32 = 0.05;
    pub const SHIP_ROTATE_SPEED: f32 = 0.001;
    /// Frames between shots
    pub const SHIP_FIRE_RATE: f32 = 80.0;

    /// Experience the ship starts with (immediately levels on the first frame)
    pub const STARTING_EXP: u32 = 10;
    pub const STARTING_EXP_TO_LEVEL: u32 = 10;
    pub const EXP_TO_LEVEL_STEP: u32 = 5;

    /// Invulnerability after (re)spawn: ceil(5 / 0.1) blinks
    pub const INVULNERABLE_BLINKS: u32 = 50;
    /// Frames per blink: ceil(0.1 * 30)
    pub const BLINK_FRAMES: u32 = 3;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 5.0;
    pub const BULLET_COLLISION_RADIUS: f32 = 3.0;
    pub const BULLET_SIZE: f32 = 4.0;

    /// Asteroid spawning
    pub const ASTEROIDS_PER_WAVE: usize = 8;
    pub const ASTEROID_SPEED: f32 = 1.0;
    /// Extra speed for waves spawned after a full clear
    pub const RESTART_SPEED_BONUS: f32 = 0.5;
    /// Exclusive upper bound of the random spawn heading
    pub const ASTEROID_HEADING_RANGE: u32 = 359;

    /// Level-up boosts
    pub const WEIGHT_BOOST: f32 = 0.005;
    pub const THRUST_BOOST: f32 = 0.02;
    pub const FIRE_RATE_DIVISOR: f32 = 25.0;
}

/// Reinterpret a stored heading the way the motion code always has:
/// `heading / π * 180`, then fed straight into `cos`/`sin`.
///
/// The result is not a true radian value. Every moving entity goes through
/// this same scaling, so motion stays self-consistent.
#[inline]
pub fn legacy_heading(heading: f32) -> f32 {
    heading / std::f32::consts::PI * 180.0
}

/// Unit direction for a stored heading
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    let theta = legacy_heading(heading);
    Vec2::new(theta.cos(), theta.sin())
}

/// Axis-aligned play area, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a point lies inside the arena rectangle (edges included)
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_heading_points_along_x() {
        let dir = heading_vector(0.0);
        assert!((dir.x - 1.0).abs() < 1e-6);
        assert!(dir.y.abs() < 1e-6);
    }

    #[test]
    fn test_legacy_heading_scaling() {
        let h = std::f32::consts::PI / 180.0;
        assert!((legacy_heading(h) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_arena_contains() {
        let arena = Arena::new(800.0, 600.0);
        assert_eq!(arena.center(), Vec2::new(400.0, 300.0));
        assert!(arena.contains(Vec2::new(0.0, 600.0)));
        assert!(!arena.contains(Vec2::new(-0.1, 10.0)));
        assert!(!arena.contains(Vec2::new(10.0, 600.5)));
    }
}

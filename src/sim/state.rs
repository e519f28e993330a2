//! Game state and core simulation types
//!
//! Everything a tick reads or mutates lives in [`SimulationState`]; there is
//! no ambient state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::ASTEROID_HEADING_RANGE;
use crate::highscores::HighScore;
use crate::tuning::Tuning;
use crate::{Arena, heading_vector};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (the ship may still be invulnerable)
    Playing,
    /// Out of lives. Terminal.
    GameOver,
}

/// Asteroid subdivision level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidTier {
    /// Freshly spawned rock
    Large,
    Medium,
    Small,
    /// Collectible remnant; harmless to the ship
    Dust,
}

impl AsteroidTier {
    /// Numeric tier, 1 (largest) to 4 (dust)
    pub fn level(self) -> u8 {
        match self {
            AsteroidTier::Large => 1,
            AsteroidTier::Medium => 2,
            AsteroidTier::Small => 3,
            AsteroidTier::Dust => 4,
        }
    }

    pub fn is_dust(self) -> bool {
        self == AsteroidTier::Dust
    }
}

/// Permanent stat modifier chosen at level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Boost {
    /// Shorter cooldown between shots
    FireRate,
    /// Stronger thrust
    TopSpeed,
    /// Less drag
    Weight,
}

impl Boost {
    pub const ALL: [Boost; 3] = [Boost::FireRate, Boost::TopSpeed, Boost::Weight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Boost::FireRate => "FireRate",
            Boost::TopSpeed => "TopSpeed",
            Boost::Weight => "Weight",
        }
    }
}

/// A boost name matching none of [`Boost::ALL`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown boost '{0}'")]
pub struct UnknownBoost(pub String);

impl std::str::FromStr for Boost {
    type Err = UnknownBoost;

    /// Case-insensitive, with or without an underscore
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "firerate" | "fire_rate" => Ok(Boost::FireRate),
            "topspeed" | "top_speed" => Ok(Boost::TopSpeed),
            "weight" => Ok(Boost::Weight),
            _ => Err(UnknownBoost(s.to_string())),
        }
    }
}

/// An unspent level-up: the set of boosts currently selectable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLevelChoice {
    /// Level reached when the choice was offered
    pub level: u32,
    pub options: Vec<Boost>,
}

impl PendingLevelChoice {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            options: Boost::ALL.to_vec(),
        }
    }

    pub fn offers(&self, boost: Boost) -> bool {
        self.options.contains(&boost)
    }
}

/// Why the ship was destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Flew into the arena edge
    OutOfBounds,
    /// Hit a non-dust asteroid
    Asteroid,
}

/// Things that happened during the last tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Fired,
    AsteroidSplit { tier: AsteroidTier },
    DustCollected,
    ShipDestroyed { cause: DeathCause, lives_left: i32 },
    LevelUp { level: u32 },
    BoostApplied(Boost),
    WaveCleared { wave: u32 },
    NewHighScore(u32),
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Accumulated velocity; the ship moves opposite to it
    pub vel: Vec2,
    /// Stored heading, scaled by [`crate::legacy_heading`] before use
    pub heading: f32,
    pub radius: f32,
    pub collision_radius: f32,
    /// Drag multiplier applied to velocity every frame
    pub weight: f32,
    /// Acceleration while thrusting
    pub thrust: f32,
    pub rotate_speed: f32,
    /// Frames between shots
    pub fire_rate: f32,
    pub thrusting: bool,
    pub current_exp: u32,
    pub total_exp: u32,
    pub exp_to_level: u32,
    pub level: u32,
    /// Blinks left in the invulnerability window; collisions resume at zero
    pub invulnerable_blinks: u32,
    /// Frames until the next blink is consumed (render phase only)
    pub blink_timer: u32,
    pub visible: bool,
}

impl Ship {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            heading: 0.0,
            radius: tuning.ship_radius,
            collision_radius: tuning.ship_collision_radius,
            weight: tuning.ship_weight,
            thrust: tuning.ship_thrust,
            rotate_speed: tuning.ship_rotate_speed,
            fire_rate: tuning.ship_fire_rate,
            thrusting: false,
            current_exp: tuning.starting_exp,
            total_exp: tuning.starting_exp,
            exp_to_level: tuning.starting_exp_to_level,
            level: 1,
            invulnerable_blinks: tuning.invulnerable_blinks,
            blink_timer: tuning.blink_frames,
            visible: true,
        }
    }

    /// Turn by `rotate_speed * dir`, `dir` in {-1, 0, 1}
    pub fn rotate(&mut self, dir: f32) {
        self.heading += self.rotate_speed * dir;
    }

    /// Add thrust along the heading when the forward key is held
    pub fn apply_thrust(&mut self) {
        if self.thrusting {
            self.vel += heading_vector(self.heading) * self.thrust;
        }
    }

    /// Edge test against the current (not yet moved) position
    pub fn out_of_bounds(&self, arena: &Arena) -> bool {
        self.pos.x < self.radius
            || self.pos.x > arena.width
            || self.pos.y < self.radius
            || self.pos.y > arena.height
    }

    /// Apply drag, then move against the velocity
    pub fn drift(&mut self) {
        self.vel *= self.weight;
        self.pos -= self.vel;
    }

    /// Tip of the ship, where bullets spawn
    pub fn nose(&self) -> Vec2 {
        self.pos - heading_vector(self.heading) * self.radius
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_blinks > 0
    }

    /// Whether the current blink phase draws the ship
    pub fn blink_visible(&self) -> bool {
        self.invulnerable_blinks % 2 == 0
    }

    /// Advance the blink countdown by one frame
    pub fn tick_blink(&mut self, blink_frames: u32) {
        if self.invulnerable_blinks > 0 {
            self.blink_timer = self.blink_timer.saturating_sub(1);
            if self.blink_timer == 0 {
                self.blink_timer = blink_frames;
                self.invulnerable_blinks -= 1;
            }
        }
    }

    /// Put the ship back at `spawn` at rest. Heading is kept.
    pub fn reset_motion(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
    }
}

/// A projectile fired by the gun
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Heading captured at fire time
    pub heading: f32,
    pub speed: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, heading: f32, speed: f32) -> Self {
        Self {
            pos,
            heading,
            speed,
        }
    }

    pub fn update(&mut self) {
        self.pos -= heading_vector(self.heading) * self.speed;
    }
}

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub heading: f32,
    pub speed: f32,
    /// Drawn size
    pub radius: f32,
    /// Hit-test size, configured independently of `radius`
    pub collision_radius: f32,
    pub tier: AsteroidTier,
}

impl Asteroid {
    /// Move along the heading, wrapping each axis independently
    pub fn update(&mut self, arena: &Arena) {
        self.pos += heading_vector(self.heading) * self.speed;

        if self.pos.x < self.radius {
            self.pos.x = arena.width;
        }
        if self.pos.x > arena.width {
            self.pos.x = self.radius;
        }
        if self.pos.y < self.radius {
            self.pos.y = arena.height;
        }
        if self.pos.y > arena.height {
            self.pos.y = self.radius;
        }
    }
}

/// Fire-rate limiter. The rate is copied from the ship on each shot, so a
/// boost only takes effect after the next shot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gun {
    pub fire_rate: f32,
    /// Frames until the next shot is allowed
    pub cooldown: f32,
}

impl Gun {
    pub fn new(fire_rate: f32) -> Self {
        Self {
            fire_rate,
            cooldown: 0.0,
        }
    }

    /// Once per frame
    pub fn update(&mut self) {
        self.cooldown = (self.cooldown - 1.0).max(0.0);
    }

    /// Shoot from the ship's nose if the cooldown has elapsed
    pub fn fire(&mut self, ship: &Ship, bullet_speed: f32) -> Option<Bullet> {
        if self.cooldown > 0.0 {
            return None;
        }
        self.fire_rate = ship.fire_rate;
        self.cooldown = self.fire_rate;
        Some(Bullet::new(ship.nose(), ship.heading, bullet_speed))
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub arena: Arena,
    pub tuning: Tuning,
    pub ship: Ship,
    pub gun: Gun,
    /// Live bullets in fire order
    pub bullets: Vec<Bullet>,
    /// Live asteroids; children are appended on subdivision
    pub asteroids: Vec<Asteroid>,
    pub lives: i32,
    pub high_score: HighScore,
    pub phase: GamePhase,
    /// Unspent level-up, if any
    pub pending_choice: Option<PendingLevelChoice>,
    /// Current wave (1-based); bumps on every full clear
    pub wave: u32,
    /// Simulation tick counter
    pub frame: u64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl SimulationState {
    /// Start a session: ship at the center, one wave of asteroids
    pub fn new(seed: u64, arena: Arena, tuning: Tuning) -> Self {
        let ship = Ship::new(arena.center(), &tuning);
        let gun = Gun::new(tuning.ship_fire_rate);
        let mut state = Self {
            arena,
            ship,
            gun,
            bullets: Vec::new(),
            asteroids: Vec::with_capacity(tuning.asteroids_per_wave),
            lives: tuning.starting_lives,
            high_score: HighScore::default(),
            phase: GamePhase::Playing,
            pending_choice: None,
            wave: 1,
            frame: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };

        let speed = state.tuning.asteroid_speed;
        state.spawn_wave(speed);
        state
    }

    /// Random whole-number heading, as asteroids have always used
    pub fn random_heading(&mut self) -> f32 {
        self.rng.random_range(0..ASTEROID_HEADING_RANGE) as f32
    }

    /// Spawn a tier-1 asteroid at a random whole-pixel position
    pub fn spawn_asteroid(&mut self, speed: f32) {
        let x = (self.rng.random::<f32>() * self.arena.width).floor();
        let y = (self.rng.random::<f32>() * self.arena.height).floor();
        let heading = self.random_heading();
        self.asteroids.push(Asteroid {
            pos: Vec2::new(x, y),
            heading,
            speed,
            radius: 50.0,
            collision_radius: 46.0,
            tier: AsteroidTier::Large,
        });
    }

    /// Spawn a full wave of tier-1 asteroids
    pub fn spawn_wave(&mut self, speed: f32) {
        for _ in 0..self.tuning.asteroids_per_wave {
            self.spawn_asteroid(speed);
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

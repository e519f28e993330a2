//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies beyond polled input

pub mod collision;
pub mod progression;
pub mod state;
pub mod subdivision;
pub mod tick;

pub use collision::{is_colliding, resolve_bullet_collisions, resolve_ship_collisions};
pub use progression::{apply_boost, check_level_up, destroy_ship};
pub use state::{
    Asteroid, AsteroidTier, Boost, Bullet, DeathCause, GameEvent, GamePhase, Gun,
    PendingLevelChoice, Ship, SimulationState, UnknownBoost,
};
pub use subdivision::{DUST_SPEED, SplitRule, split_rule, subdivide};
pub use tick::{TickInput, restart_wave, tick};

//! Collision detection and resolution
//!
//! Everything is a circle. Each frame runs two passes against the live entity
//! sets: ship against asteroids, then bullets against asteroids.

use glam::Vec2;

use super::progression::destroy_ship;
use super::state::{DeathCause, GameEvent, SimulationState};
use super::subdivision::{split_rule, subdivide};

/// Circle overlap test. Touching circles do not collide.
#[inline]
pub fn is_colliding(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> bool {
    r1 + r2 > (p1 - p2).length()
}

/// Ship against every asteroid.
///
/// Skipped while the ship is invulnerable. Dust in contact is collected.
/// Contact with anything else destroys the ship, and the scan carries on with
/// the respawned ship, so one pass can cost more than one life.
///
/// Collecting dust still advances the scan, so the asteroid that shifts into
/// the emptied slot is not checked until the next frame.
pub fn resolve_ship_collisions(state: &mut SimulationState) {
    if state.ship.is_invulnerable() {
        return;
    }

    let mut i = 0;
    while i < state.asteroids.len() {
        let rock = &state.asteroids[i];
        let hit = is_colliding(
            state.ship.pos,
            state.ship.collision_radius,
            rock.pos,
            rock.collision_radius,
        );

        if hit {
            if rock.tier.is_dust() {
                state.asteroids.remove(i);
                state.ship.current_exp += 1;
                state.ship.total_exp += 1;
                state.events.push(GameEvent::DustCollected);
                log::debug!("Dust collected (total exp {})", state.ship.total_exp);
            } else {
                destroy_ship(state, DeathCause::Asteroid);
            }
        }
        i += 1;
    }
}

/// Bullets against asteroids, resolving at most one hit per frame.
///
/// Asteroids are scanned in order, each against every bullet. The first
/// overlapping pair ends the pass. A splittable asteroid is replaced by its
/// children and the bullet is spent; dust lets the bullet through but still
/// ends the pass.
///
/// Returns true if an asteroid was destroyed.
pub fn resolve_bullet_collisions(state: &mut SimulationState) -> bool {
    let bullet_radius = state.tuning.bullet_collision_radius;
    let hit = state.asteroids.iter().enumerate().find_map(|(ai, rock)| {
        state
            .bullets
            .iter()
            .position(|b| is_colliding(b.pos, bullet_radius, rock.pos, rock.collision_radius))
            .map(|bi| (ai, bi))
    });

    let Some((ai, bi)) = hit else {
        return false;
    };

    let tier = state.asteroids[ai].tier;
    if split_rule(tier).is_none() {
        return false;
    }

    let parent = state.asteroids.remove(ai);
    state.bullets.remove(bi);

    let base_speed = state.tuning.asteroid_speed;
    let children = subdivide(&parent, base_speed, || state.random_heading());
    log::debug!(
        "Tier {} asteroid split into {} at ({:.0}, {:.0})",
        tier.level(),
        children.len(),
        parent.pos.x,
        parent.pos.y
    );
    state.asteroids.extend(children);
    state.events.push(GameEvent::AsteroidSplit { tier });
    true
}

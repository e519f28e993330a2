//! Per-frame simulation tick
//!
//! One call per display frame. Order within a tick is fixed:
//! input → gun → wave restart → collisions → ship physics → leveling →
//! bullets → asteroids → high score.

use super::collision::{resolve_bullet_collisions, resolve_ship_collisions};
use super::progression::{check_level_up, destroy_ship, update_high_score};
use super::state::{DeathCause, GameEvent, GamePhase, SimulationState};
use crate::platform::{InputSource, Key};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Thrust (W)
    pub forward: bool,
    /// Turn counter-clockwise (A)
    pub rotate_left: bool,
    /// Turn clockwise (D)
    pub rotate_right: bool,
    /// Shoot (Space)
    pub fire: bool,
}

impl TickInput {
    /// Sample the host's key state
    pub fn poll<I: InputSource + ?Sized>(input: &I) -> Self {
        Self {
            forward: input.is_pressed(Key::Forward),
            rotate_left: input.is_pressed(Key::RotateLeft),
            rotate_right: input.is_pressed(Key::RotateRight),
            fire: input.is_pressed(Key::Fire),
        }
    }
}

/// Advance the simulation by one frame
pub fn tick(state: &mut SimulationState, input: &TickInput) {
    state.events.clear();

    // Nothing moves once the game is over
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.frame += 1;

    // Controls
    state.ship.thrusting = input.forward;
    state.gun.update();
    if input.rotate_right {
        state.ship.rotate(1.0);
    }
    if input.rotate_left {
        state.ship.rotate(-1.0);
    }
    if input.fire {
        fire_gun(state);
    }

    // Arena cleared on the previous frame
    if state.asteroids.is_empty() {
        restart_wave(state);
    }

    resolve_ship_collisions(state);
    resolve_bullet_collisions(state);

    if state.ship.visible {
        update_ship(state);
    }

    check_level_up(state);

    let arena = state.arena;
    for bullet in &mut state.bullets {
        bullet.update();
    }
    if state.tuning.cull_offscreen_bullets {
        state.bullets.retain(|b| arena.contains(b.pos));
    }
    for rock in &mut state.asteroids {
        rock.update(&arena);
    }

    update_high_score(state);
}

fn fire_gun(state: &mut SimulationState) {
    let speed = state.tuning.bullet_speed;
    if let Some(bullet) = state.gun.fire(&state.ship, speed) {
        log::debug!("Fired (next shot in {:.1} frames)", state.gun.cooldown);
        state.bullets.push(bullet);
        state.events.push(GameEvent::Fired);
    }
}

/// Thrust, edge check on the pre-move position, drag and move, blink
fn update_ship(state: &mut SimulationState) {
    state.ship.apply_thrust();
    if state.ship.out_of_bounds(&state.arena) {
        destroy_ship(state, DeathCause::OutOfBounds);
    }
    state.ship.drift();
    state.ship.tick_blink(state.tuning.blink_frames);
}

/// Recenter the ship and spawn a faster wave after a full clear
pub fn restart_wave(state: &mut SimulationState) {
    let cleared = state.wave;
    state.events.push(GameEvent::WaveCleared { wave: cleared });
    state.wave += 1;

    state.ship.reset_motion(state.arena.center());
    let speed = state.tuning.restart_asteroid_speed();
    state.spawn_wave(speed);
    log::info!(
        "Wave {} cleared, spawning wave {} at speed {}",
        cleared,
        state.wave,
        speed
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arena;
    use crate::platform::KeyboardState;
    use crate::sim::state::{Asteroid, AsteroidTier, Boost, Bullet};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn new_state() -> SimulationState {
        SimulationState::new(12345, Arena::new(800.0, 600.0), Tuning::default())
    }

    /// A motionless rock well away from the center
    fn parked_rock(pos: Vec2, tier: AsteroidTier) -> Asteroid {
        Asteroid {
            pos,
            heading: 0.0,
            speed: 0.0,
            radius: 50.0,
            collision_radius: 46.0,
            tier,
        }
    }

    #[test]
    fn test_poll_input() {
        let mut keys = KeyboardState::new();
        keys.handle_code("KeyW", true);
        keys.handle_code("Space", true);
        let input = TickInput::poll(&keys);
        assert!(input.forward && input.fire);
        assert!(!input.rotate_left && !input.rotate_right);
    }

    #[test]
    fn test_starting_exp_levels_up_on_first_frame() {
        let mut state = new_state();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ship.level, 2);
        assert_eq!(state.ship.current_exp, 0);
        assert_eq!(state.ship.exp_to_level, 15);
        assert!(state.pending_choice.is_some());
        assert!(state.events.contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_level_up_then_boost() {
        let mut state = new_state();
        state.ship.current_exp = 10;
        state.ship.exp_to_level = 10;
        tick(&mut state, &TickInput::default());

        let choice = state.pending_choice.clone().unwrap();
        assert_eq!(choice.options.len(), 3);

        let before = state.ship.fire_rate;
        assert!(crate::sim::apply_boost(&mut state, Boost::FireRate));
        assert!((state.ship.fire_rate - before * 0.96).abs() < 1e-4);
        assert!(state.pending_choice.is_none());
    }

    #[test]
    fn test_fire_and_cooldown() {
        let mut state = new_state();
        state.asteroids = vec![parked_rock(Vec2::new(700.0, 100.0), AsteroidTier::Large)];
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        tick(&mut state, &fire);
        assert_eq!(state.bullets.len(), 1);
        assert!(state.events.contains(&GameEvent::Fired));
        // Spawned at the nose and moved once
        assert!((state.bullets[0].pos.x - 380.0).abs() < 1e-3);

        tick(&mut state, &fire);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_offscreen_bullets_are_culled() {
        let mut state = new_state();
        state.asteroids = vec![parked_rock(Vec2::new(700.0, 100.0), AsteroidTier::Large)];
        state.bullets.push(Bullet::new(Vec2::new(2.0, 300.0), 0.0, 5.0));
        state.bullets.push(Bullet::new(Vec2::new(300.0, 300.0), 0.0, 5.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_culling_can_be_disabled() {
        let tuning = Tuning {
            cull_offscreen_bullets: false,
            ..Tuning::default()
        };
        let mut state = SimulationState::new(1, Arena::new(800.0, 600.0), tuning);
        state.asteroids = vec![parked_rock(Vec2::new(700.0, 100.0), AsteroidTier::Large)];
        state.bullets.push(Bullet::new(Vec2::new(2.0, 300.0), 0.0, 5.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bullets.len(), 1);
        assert!(state.bullets[0].pos.x < 0.0);
    }

    #[test]
    fn test_bullet_hit_splits_asteroid() {
        let mut state = new_state();
        state.asteroids = vec![parked_rock(Vec2::new(100.0, 100.0), AsteroidTier::Large)];
        state.bullets.push(Bullet::new(Vec2::new(110.0, 100.0), 0.0, 5.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.asteroids.len(), 2);
        assert!(state.asteroids.iter().all(|a| a.tier == AsteroidTier::Medium));
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_boundary_death_respawns() {
        let mut state = new_state();
        state.asteroids = vec![parked_rock(Vec2::new(700.0, 100.0), AsteroidTier::Large)];
        state.lives = 2;
        state.ship.invulnerable_blinks = 0;
        state.ship.pos = Vec2::new(5.0, 300.0);
        state.ship.vel = Vec2::new(1.0, 0.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ship.vel, Vec2::ZERO);
        assert_eq!(state.ship.invulnerable_blinks, 50);

        let mut previous = state.ship.invulnerable_blinks;
        let mut frames = 0;
        while state.ship.invulnerable_blinks > 0 {
            tick(&mut state, &TickInput::default());
            assert!(state.ship.invulnerable_blinks <= previous);
            previous = state.ship.invulnerable_blinks;
            frames += 1;
            assert!(frames <= 150);
        }
        assert_eq!(state.lives, 1);
    }

    #[test]
    fn test_boundary_death_on_last_life_ends_game() {
        let mut state = new_state();
        state.lives = 1;
        state.ship.pos = Vec2::new(400.0, 700.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver));

        // Input is ignored and nothing advances
        let frame = state.frame;
        let fire = TickInput {
            fire: true,
            forward: true,
            ..Default::default()
        };
        tick(&mut state, &fire);
        assert_eq!(state.frame, frame);
        assert!(state.bullets.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_cleared_arena_spawns_faster_wave() {
        let mut state = new_state();
        state.asteroids.clear();
        state.ship.pos = Vec2::new(200.0, 200.0);
        state.ship.vel = Vec2::new(0.3, 0.3);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.asteroids.len(), 8);
        assert!(state.asteroids.iter().all(|a| (a.speed - 1.5).abs() < 1e-6));
        assert!(state.asteroids.iter().all(|a| a.tier == AsteroidTier::Large));
        assert_eq!(state.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ship.vel, Vec2::ZERO);
        assert_eq!(state.wave, 2);
        assert!(state.events.contains(&GameEvent::WaveCleared { wave: 1 }));
    }

    #[test]
    fn test_rotation_and_thrust() {
        let mut state = new_state();
        let input = TickInput {
            rotate_right: true,
            forward: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!((state.ship.heading - 0.001).abs() < 1e-7);
        assert!(state.ship.vel.length() > 0.0);
        // Moves opposite to the accumulated velocity
        assert!(state.ship.pos.x < 400.0);
    }

    #[test]
    fn test_high_score_follows_total_exp() {
        let mut state = new_state();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.high_score.best, state.ship.total_exp);
        assert!(state.events.contains(&GameEvent::NewHighScore(10)));
    }

    #[test]
    fn test_determinism() {
        let mut a = new_state();
        let mut b = new_state();
        let inputs = [
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                forward: true,
                rotate_left: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..100 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        assert_eq!(a.frame, b.frame);
        assert_eq!(a.asteroids.len(), b.asteroids.len());
        assert_eq!(a.ship.pos, b.ship.pos);
        for (x, y) in a.asteroids.iter().zip(&b.asteroids) {
            assert_eq!(x.pos, y.pos);
        }
    }
}

//! Lives, leveling and boosts
//!
//! Session flow: `Playing` (vulnerable, or invulnerable while blinks remain)
//! until the last life is lost, then `GameOver`, which is terminal.

use super::state::{Boost, DeathCause, GameEvent, GamePhase, PendingLevelChoice, SimulationState};

/// Lose a life and respawn at the arena center with a fresh invulnerability
/// window. The last life ends the session.
pub fn destroy_ship(state: &mut SimulationState, cause: DeathCause) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.lives -= 1;
    state.ship.reset_motion(state.arena.center());
    state.ship.invulnerable_blinks = state.tuning.invulnerable_blinks;
    state.events.push(GameEvent::ShipDestroyed {
        cause,
        lives_left: state.lives,
    });
    log::info!("Ship destroyed ({:?}), {} lives left", cause, state.lives);

    if state.lives <= 0 {
        state.phase = GamePhase::GameOver;
        state.ship.visible = false;
        state.events.push(GameEvent::GameOver);
        log::info!(
            "Game over at level {} with {} exp",
            state.ship.level,
            state.ship.total_exp
        );
    }
}

/// Level up once if enough experience has been banked.
///
/// Returns true on level-up. A choice left unspent from an earlier level stays
/// open; it is not stacked.
pub fn check_level_up(state: &mut SimulationState) -> bool {
    let ship = &mut state.ship;
    if ship.current_exp < ship.exp_to_level {
        return false;
    }

    ship.exp_to_level += state.tuning.exp_to_level_step;
    ship.current_exp = 0;
    ship.level += 1;
    let level = ship.level;

    state.pending_choice = Some(PendingLevelChoice::new(level));
    state.events.push(GameEvent::LevelUp { level });
    log::info!("Level up! Now level {}", level);
    true
}

/// Spend the pending level choice on `boost`.
///
/// Returns false (and changes nothing) when no choice is pending or the boost
/// is not on offer. Any successful pick closes all options.
pub fn apply_boost(state: &mut SimulationState, boost: Boost) -> bool {
    let offered = state
        .pending_choice
        .as_ref()
        .is_some_and(|choice| choice.offers(boost));
    if !offered {
        return false;
    }

    let tuning = &state.tuning;
    let ship = &mut state.ship;
    match boost {
        Boost::Weight => ship.weight -= tuning.weight_boost,
        Boost::TopSpeed => ship.thrust += tuning.thrust_boost,
        Boost::FireRate => ship.fire_rate -= ship.fire_rate / tuning.fire_rate_divisor,
    }

    state.pending_choice = None;
    state.events.push(GameEvent::BoostApplied(boost));
    log::info!("Boost applied: {}", boost.as_str());
    true
}

/// Fold the ship's total experience into the session high score
pub fn update_high_score(state: &mut SimulationState) {
    let total = state.ship.total_exp;
    if state.high_score.observe(total) {
        state.events.push(GameEvent::NewHighScore(total));
    }
}

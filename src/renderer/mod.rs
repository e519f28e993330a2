//! Frame drawing
//!
//! Draws the simulation through a [`RenderSurface`]. The world is drawn with a
//! camera offset that pins the ship to the arena center; the HUD is drawn in
//! screen space on top.

pub mod shapes;

use glam::Vec2;

use crate::platform::{Color, RenderSurface};
use crate::sim::SimulationState;

const HUD_FONT_PX: f32 = 21.0;
const LABEL_FONT_PX: f32 = 10.0;
const GAME_OVER_FONT_PX: f32 = 50.0;

/// Draw one frame
pub fn draw_frame<S: RenderSurface + ?Sized>(state: &SimulationState, surface: &mut S) {
    surface.clear();

    let camera = camera_offset(state);
    draw_world(state, surface, camera);
    draw_hud(state, surface);
}

/// Offset applied to world coordinates
pub fn camera_offset(state: &SimulationState) -> Vec2 {
    state.arena.center() - state.ship.pos
}

fn draw_world<S: RenderSurface + ?Sized>(state: &SimulationState, surface: &mut S, camera: Vec2) {
    let arena = &state.arena;
    surface.stroke_rect(
        Vec2::ONE + camera,
        Vec2::new(arena.width - 2.0, arena.height - 2.0),
        Color::White,
    );

    let ship = &state.ship;
    if ship.visible {
        let pos = ship.pos + camera;
        if ship.blink_visible() {
            let outline = shapes::ship_outline(pos, ship.radius, ship.heading);
            surface.stroke_polygon(&outline, Color::White);
            let label = format!("{}/{}", ship.current_exp, ship.exp_to_level);
            surface.fill_text(&label, pos - Vec2::new(0.0, 20.0), LABEL_FONT_PX, Color::White);
        }
        if state.pending_choice.is_some() {
            surface.fill_text("LEVEL UP", pos + Vec2::new(50.0, 0.0), LABEL_FONT_PX, Color::White);
        }
    }

    let bullet_size = Vec2::splat(state.tuning.bullet_size);
    for bullet in &state.bullets {
        surface.fill_rect(bullet.pos + camera, bullet_size, Color::White);
    }

    for rock in &state.asteroids {
        let outline = shapes::asteroid_outline(rock.pos + camera, rock.radius, rock.heading);
        if rock.tier.is_dust() {
            surface.fill_polygon(&outline, Color::Yellow);
            surface.stroke_polygon(&outline, Color::Yellow);
        } else {
            surface.stroke_polygon(&outline, Color::White);
        }
    }
}

fn draw_hud<S: RenderSurface + ?Sized>(state: &SimulationState, surface: &mut S) {
    let (width, height) = surface.size();

    let lines = [
        format!("EXP : {}", state.ship.total_exp),
        format!("EXP RECORD : {}", state.high_score.best),
        format!("LEVEL : {}", state.ship.level),
    ];
    for (i, line) in lines.iter().enumerate() {
        let pos = Vec2::new(20.0, 35.0 + 35.0 * i as f32);
        surface.fill_text(line, pos, HUD_FONT_PX, Color::White);
    }

    // Lives, right to left from the top-right corner
    let mut top = Vec2::new(width - 50.0, 10.0);
    for _ in 0..state.lives.max(0) {
        surface.stroke_polygon(&shapes::life_marker(top), Color::White);
        top.x -= 30.0;
    }

    if state.is_game_over() {
        let pos = Vec2::new(width / 2.0 - 150.0, height / 2.0);
        surface.fill_text("GAME OVER", pos, GAME_OVER_FONT_PX, Color::White);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arena;
    use crate::sim::{AsteroidTier, GamePhase, PendingLevelChoice};
    use crate::tuning::Tuning;

    /// Records draw calls
    #[derive(Default)]
    struct Recorder {
        texts: Vec<String>,
        strokes: usize,
        fills: Vec<Color>,
        rects: usize,
    }

    impl RenderSurface for Recorder {
        fn size(&self) -> (f32, f32) {
            (800.0, 600.0)
        }
        fn clear(&mut self) {}
        fn stroke_polygon(&mut self, _points: &[Vec2], _color: Color) {
            self.strokes += 1;
        }
        fn fill_polygon(&mut self, _points: &[Vec2], color: Color) {
            self.fills.push(color);
        }
        fn fill_rect(&mut self, _pos: Vec2, _size: Vec2, _color: Color) {
            self.rects += 1;
        }
        fn stroke_rect(&mut self, _pos: Vec2, _size: Vec2, _color: Color) {}
        fn fill_text(&mut self, text: &str, _pos: Vec2, _font_px: f32, _color: Color) {
            self.texts.push(text.to_string());
        }
    }

    fn new_state() -> SimulationState {
        SimulationState::new(9, Arena::new(800.0, 600.0), Tuning::default())
    }

    #[test]
    fn test_hud_and_entities() {
        let mut state = new_state();
        state.ship.invulnerable_blinks = 0;
        state.pending_choice = Some(PendingLevelChoice::new(2));
        state.asteroids[0].tier = AsteroidTier::Dust;

        let mut surface = Recorder::default();
        draw_frame(&state, &mut surface);

        assert!(surface.texts.contains(&"EXP : 10".to_string()));
        assert!(surface.texts.contains(&"EXP RECORD : 0".to_string()));
        assert!(surface.texts.contains(&"LEVEL : 1".to_string()));
        assert!(surface.texts.contains(&"10/10".to_string()));
        assert!(surface.texts.contains(&"LEVEL UP".to_string()));
        // ship + 8 asteroids + 3 lives
        assert_eq!(surface.strokes, 1 + 8 + 3);
        assert_eq!(surface.fills, vec![Color::Yellow]);
        assert!(!surface.texts.contains(&"GAME OVER".to_string()));
    }

    #[test]
    fn test_ship_hidden_on_odd_blink() {
        let mut state = new_state();
        state.ship.invulnerable_blinks = 3;
        let mut surface = Recorder::default();
        draw_frame(&state, &mut surface);
        assert!(!surface.texts.contains(&"10/10".to_string()));
    }

    #[test]
    fn test_game_over_banner() {
        let mut state = new_state();
        state.phase = GamePhase::GameOver;
        state.ship.visible = false;
        state.lives = 0;
        let mut surface = Recorder::default();
        draw_frame(&state, &mut surface);
        assert!(surface.texts.contains(&"GAME OVER".to_string()));
        assert_eq!(surface.strokes, 8);
    }

    #[test]
    fn test_camera_pins_ship_to_center() {
        let mut state = new_state();
        state.ship.pos = Vec2::new(300.0, 250.0);
        assert_eq!(state.ship.pos + camera_offset(&state), state.arena.center());
    }
}

//! Asteroid Drift entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlButtonElement, HtmlCanvasElement, KeyboardEvent};

    use glam::Vec2;
    use asteroid_drift::persistence::LocalStorageStore;
    use asteroid_drift::platform::{
        BoostControls, Color, KeyboardState, RenderSurface, sync_boost_controls,
    };
    use asteroid_drift::renderer::draw_frame;
    use asteroid_drift::sim::{Boost, GameEvent, SimulationState, TickInput, apply_boost, tick};
    use asteroid_drift::{Arena, HighScore, Tuning};

    /// Canvas 2D drawing target
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        width: f32,
        height: f32,
    }

    impl CanvasSurface {
        fn trace(&self, points: &[Vec2]) {
            self.ctx.begin_path();
            for p in points {
                self.ctx.line_to(p.x as f64, p.y as f64);
            }
            self.ctx.close_path();
        }
    }

    impl RenderSurface for CanvasSurface {
        fn size(&self) -> (f32, f32) {
            (self.width, self.height)
        }

        fn clear(&mut self) {
            self.ctx
                .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
        }

        fn stroke_polygon(&mut self, points: &[Vec2], color: Color) {
            self.trace(points);
            self.ctx.set_stroke_style_str(color.as_css());
            self.ctx.stroke();
        }

        fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
            self.trace(points);
            self.ctx.set_fill_style_str(color.as_css());
            self.ctx.fill();
        }

        fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
            self.ctx.set_fill_style_str(color.as_css());
            self.ctx
                .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
        }

        fn stroke_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
            self.ctx.set_stroke_style_str(color.as_css());
            self.ctx
                .stroke_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
        }

        fn fill_text(&mut self, text: &str, pos: Vec2, font_px: f32, color: Color) {
            self.ctx.set_font(&format!("{}px Helvetica", font_px));
            self.ctx.set_fill_style_str(color.as_css());
            let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
        }
    }

    /// The three level-up buttons in the page
    struct DomBoostButtons;

    fn button_id(boost: Boost) -> &'static str {
        match boost {
            Boost::FireRate => "buttonFireRate",
            Boost::TopSpeed => "buttonTopSpeed",
            Boost::Weight => "buttonWeight",
        }
    }

    fn find_button(boost: Boost) -> Option<HtmlButtonElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(button_id(boost))?
            .dyn_into()
            .ok()
    }

    impl BoostControls for DomBoostButtons {
        fn set_available(&mut self, boost: Boost, available: bool) {
            if let Some(btn) = find_button(boost) {
                btn.set_disabled(!available);
                let visibility = if available { "visible" } else { "hidden" };
                let _ = btn.style().set_property("visibility", visibility);
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: SimulationState,
        keys: KeyboardState,
        surface: CanvasSurface,
        buttons: DomBoostButtons,
        store: Option<LocalStorageStore>,
    }

    impl Game {
        /// Run one simulation tick and draw it
        fn frame(&mut self) {
            let input = TickInput::poll(&self.keys);
            tick(&mut self.state, &input);

            for event in &self.state.events {
                match event {
                    GameEvent::LevelUp { level } => log::info!("Level {} reached", level),
                    GameEvent::GameOver => log::info!("Game over"),
                    _ => {}
                }
            }

            sync_boost_controls(self.state.pending_choice.as_ref(), &mut self.buttons);
            draw_frame(&self.state, &mut self.surface);

            if let Some(store) = self.store.as_mut() {
                self.state.high_score.save(store);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Asteroid Drift starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("asteroid-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("getContext failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");
        ctx.set_fill_style_str("black");
        ctx.fill_rect(0.0, 0.0, width, height);

        let store = match LocalStorageStore::new() {
            Ok(store) => Some(store),
            Err(e) => {
                log::warn!("{}, high score will not persist", e);
                None
            }
        };

        let seed = js_sys::Date::now() as u64;
        let arena = Arena::new(width as f32, height as f32);
        let mut state = SimulationState::new(seed, arena, Tuning::default());
        if let Some(store) = store.as_ref() {
            state.high_score = HighScore::load(store);
        }
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            keys: KeyboardState::new(),
            surface: CanvasSurface {
                ctx,
                width: width as f32,
                height: height as f32,
            },
            buttons: DomBoostButtons,
            store,
        }));

        setup_input_handlers(game.clone());
        setup_boost_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Asteroid Drift running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.handle_code(&event.code(), pressed);
            });
            let _ = document
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup never arrives for keys held while focus leaves the page
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut()>::new(move || {
            game.borrow_mut().keys.clear();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_boost_buttons(game: Rc<RefCell<Game>>) {
        for boost in Boost::ALL {
            let Some(btn) = find_button(boost) else {
                log::warn!("Missing #{} button", button_id(boost));
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                let g = &mut *g;
                if apply_boost(&mut g.state, boost) {
                    sync_boost_controls(None, &mut g.buttons);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::collections::HashSet;
    use std::path::Path;

    use asteroid_drift::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
    use asteroid_drift::platform::{BoostControls, Key, KeyboardState, sync_boost_controls};
    use asteroid_drift::sim::{Boost, GameEvent, SimulationState, TickInput, apply_boost, tick};
    use asteroid_drift::{Arena, HighScore, Tuning};

    const DEFAULT_FRAMES: u64 = 60 * 60;
    const STORE_PATH: &str = "asteroid-drift.json";

    /// Records which boost triggers are live so the pilot can press one
    #[derive(Default)]
    struct BoostPanel {
        available: HashSet<Boost>,
        preferred: Option<Boost>,
    }

    impl BoostControls for BoostPanel {
        fn set_available(&mut self, boost: Boost, available: bool) {
            if available {
                self.available.insert(boost);
            } else {
                self.available.remove(&boost);
            }
        }
    }

    impl BoostPanel {
        /// The preferred boost if live, else the first live trigger in a
        /// fixed rotation so runs stay reproducible
        fn pick(&self, level: u32) -> Option<Boost> {
            if let Some(boost) = self.preferred.filter(|b| self.available.contains(b)) {
                return Some(boost);
            }
            let start = level as usize % Boost::ALL.len();
            (0..Boost::ALL.len())
                .map(|i| Boost::ALL[(start + i) % Boost::ALL.len()])
                .find(|b| self.available.contains(b))
        }
    }

    fn open_store() -> Box<dyn KeyValueStore> {
        match JsonFileStore::open(STORE_PATH) {
            Ok(store) => {
                log::info!("High score file: {}", store.path().display());
                Box::new(store)
            }
            Err(e) => {
                log::warn!("Cannot open {} ({}), using memory store", STORE_PATH, e);
                Box::new(MemoryStore::new())
            }
        }
    }

    fn seed() -> u64 {
        std::env::var("ASTEROID_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_millis() as u64)
                    .unwrap_or(0)
            })
    }

    /// Fly a turret pilot (spin and shoot, never thrust) for a fixed number of frames
    pub fn run() {
        let tuning = std::env::var("ASTEROID_TUNING")
            .map(|path| Tuning::load_or_default(Path::new(&path)))
            .unwrap_or_default();
        let frames = std::env::var("ASTEROID_FRAMES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_FRAMES);

        let mut store = open_store();
        let seed = seed();
        let mut state = SimulationState::new(seed, Arena::new(1280.0, 720.0), tuning);
        state.high_score = HighScore::load(store.as_ref());
        log::info!("Game initialized with seed: {}", seed);

        let mut keys = KeyboardState::new();
        keys.set(Key::RotateRight, true);
        keys.set(Key::Fire, true);
        let mut panel = BoostPanel {
            preferred: std::env::var("ASTEROID_BOOST").ok().and_then(|s| {
                s.parse::<Boost>()
                    .map_err(|e| log::warn!("Ignoring ASTEROID_BOOST: {}", e))
                    .ok()
            }),
            ..Default::default()
        };

        for _ in 0..frames {
            tick(&mut state, &TickInput::poll(&keys));

            for event in &state.events {
                match event {
                    GameEvent::WaveCleared { wave } => log::info!("Wave {} cleared", wave),
                    GameEvent::GameOver => log::info!("Game over on frame {}", state.frame),
                    other => log::trace!("{:?}", other),
                }
            }

            sync_boost_controls(state.pending_choice.as_ref(), &mut panel);
            if let Some(boost) = panel.pick(state.ship.level) {
                apply_boost(&mut state, boost);
                sync_boost_controls(state.pending_choice.as_ref(), &mut panel);
            }

            state.high_score.save(store.as_mut());

            if state.is_game_over() {
                break;
            }
        }

        println!(
            "frames={} wave={} level={} exp={} record={} lives={}",
            state.frame,
            state.wave,
            state.ship.level,
            state.ship.total_exp,
            state.high_score.best,
            state.lives
        );
        match serde_json::to_string(&state.ship) {
            Ok(json) => println!("ship={}", json),
            Err(e) => log::warn!("Cannot serialize ship: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroid Drift (native) starting...");
    log::info!("Running headless - build for wasm32 to play in the browser");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

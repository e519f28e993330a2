//! Platform abstraction layer
//!
//! The simulation talks to its host only through these traits:
//! - [`InputSource`]: polled key state
//! - [`RenderSurface`]: 2D drawing primitives and arena size
//! - [`BoostControls`]: the three level-up triggers
//!
//! Persistence lives in [`crate::persistence`].

use std::collections::HashMap;

use glam::Vec2;

use crate::sim::{Boost, PendingLevelChoice};

/// Game actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// W
    Forward,
    /// A
    RotateLeft,
    /// D
    RotateRight,
    /// Space
    Fire,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Key::Forward),
            "KeyA" => Some(Key::RotateLeft),
            "KeyD" => Some(Key::RotateRight),
            "Space" => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Pressed/released state per key, polled once per tick
pub trait InputSource {
    fn is_pressed(&self, key: Key) -> bool;
}

/// Key state fed by host key events
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashMap<Key, bool>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or release. Unbound codes are ignored.
    pub fn handle_code(&mut self, code: &str, pressed: bool) {
        if let Some(key) = Key::from_code(code) {
            self.set(key, pressed);
        }
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        self.pressed.insert(key, pressed);
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

impl InputSource for KeyboardState {
    fn is_pressed(&self, key: Key) -> bool {
        self.pressed.get(&key).copied().unwrap_or(false)
    }
}

/// Flat colors used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Yellow,
    Black,
}

impl Color {
    /// CSS color name
    pub fn as_css(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Yellow => "yellow",
            Color::Black => "black",
        }
    }
}

/// 2D drawing target
pub trait RenderSurface {
    /// Drawable area (width, height)
    fn size(&self) -> (f32, f32);
    fn clear(&mut self);
    fn stroke_polygon(&mut self, points: &[Vec2], color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn stroke_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn fill_text(&mut self, text: &str, pos: Vec2, font_px: f32, color: Color);
}

/// The three level-up triggers
pub trait BoostControls {
    /// Enable and show (or disable and hide) the trigger for `boost`
    fn set_available(&mut self, boost: Boost, available: bool);
}

/// Mirror the pending choice onto the host controls
pub fn sync_boost_controls<C: BoostControls + ?Sized>(
    choice: Option<&PendingLevelChoice>,
    controls: &mut C,
) {
    for boost in Boost::ALL {
        let available = choice.is_some_and(|c| c.offers(boost));
        controls.set_available(boost, available);
    }
}

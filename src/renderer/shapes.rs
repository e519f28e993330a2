//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use crate::legacy_heading;

/// Regular polygon around `center`, rotated by the entity's heading.
///
/// Vertices sit at `center - radius * (cos a, sin a)` so the first vertex is
/// the ship's nose.
pub fn heading_polygon(center: Vec2, radius: f32, heading: f32, sides: usize) -> Vec<Vec2> {
    let step = TAU / sides as f32;
    let theta = legacy_heading(heading);
    (0..sides)
        .map(|i| {
            let a = step * i as f32 + theta;
            center - radius * Vec2::new(a.cos(), a.sin())
        })
        .collect()
}

/// Ship triangle
pub fn ship_outline(center: Vec2, radius: f32, heading: f32) -> Vec<Vec2> {
    heading_polygon(center, radius, heading, 3)
}

/// Asteroid hexagon
pub fn asteroid_outline(center: Vec2, radius: f32, heading: f32) -> Vec<Vec2> {
    heading_polygon(center, radius, heading, 6)
}

/// Small triangle used for the lives counter, apex at `top`
pub fn life_marker(top: Vec2) -> Vec<Vec2> {
    vec![top, top + Vec2::new(9.0, 9.0), top + Vec2::new(-9.0, 9.0)]
}

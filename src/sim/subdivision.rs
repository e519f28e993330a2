//! Asteroid subdivision table
//!
//! A destroyed asteroid's tier fully determines its children: how many, where
//! they appear relative to the parent, their size and speed. Headings are the
//! only random part and are supplied by the caller.

use glam::Vec2;

use super::state::{Asteroid, AsteroidTier};

/// Shape of the children produced by one tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRule {
    pub child_tier: AsteroidTier,
    /// Spawn offsets from the parent position, one per child
    pub offsets: &'static [Vec2],
    pub radius: f32,
    pub collision_radius: f32,
    /// Fixed child speed; `None` keeps the default spawn speed
    pub speed: Option<f32>,
}

const PAIR_OFFSETS: [Vec2; 2] = [Vec2::new(-5.0, -5.0), Vec2::new(5.0, 5.0)];

const DUST_OFFSETS: [Vec2; 4] = [
    Vec2::new(-2.0, -5.0),
    Vec2::new(2.0, 5.0),
    Vec2::new(-4.0, -5.0),
    Vec2::new(4.0, 5.0),
];

/// Dust drifts much slower than rocks
pub const DUST_SPEED: f32 = 0.1;

/// Look up the split for a tier. Dust does not split.
pub fn split_rule(tier: AsteroidTier) -> Option<SplitRule> {
    match tier {
        AsteroidTier::Large => Some(SplitRule {
            child_tier: AsteroidTier::Medium,
            offsets: &PAIR_OFFSETS,
            radius: 25.0,
            collision_radius: 22.0,
            speed: None,
        }),
        AsteroidTier::Medium => Some(SplitRule {
            child_tier: AsteroidTier::Small,
            offsets: &PAIR_OFFSETS,
            radius: 15.0,
            collision_radius: 12.0,
            speed: None,
        }),
        AsteroidTier::Small => Some(SplitRule {
            child_tier: AsteroidTier::Dust,
            offsets: &DUST_OFFSETS,
            radius: 5.0,
            collision_radius: 6.0,
            speed: Some(DUST_SPEED),
        }),
        AsteroidTier::Dust => None,
    }
}

/// Build the children of `parent`.
///
/// `base_speed` is used for children without a fixed speed; `next_heading` is
/// called once per child in spawn order.
pub fn subdivide(
    parent: &Asteroid,
    base_speed: f32,
    mut next_heading: impl FnMut() -> f32,
) -> Vec<Asteroid> {
    let Some(rule) = split_rule(parent.tier) else {
        return Vec::new();
    };

    rule.offsets
        .iter()
        .map(|offset| Asteroid {
            pos: parent.pos + *offset,
            heading: next_heading(),
            speed: rule.speed.unwrap_or(base_speed),
            radius: rule.radius,
            collision_radius: rule.collision_radius,
            tier: rule.child_tier,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rock(tier: AsteroidTier) -> Asteroid {
        Asteroid {
            pos: Vec2::new(200.0, 100.0),
            heading: 12.0,
            speed: 1.5,
            radius: 50.0,
            collision_radius: 46.0,
            tier,
        }
    }

    #[test]
    fn test_large_splits_into_two_medium() {
        let children = subdivide(&rock(AsteroidTier::Large), 1.0, || 3.0);
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| c.tier == AsteroidTier::Medium));
        assert_eq!(children[0].pos, Vec2::new(195.0, 95.0));
        assert_eq!(children[1].pos, Vec2::new(205.0, 105.0));
        assert_eq!(children[0].radius, 25.0);
        assert_eq!(children[0].collision_radius, 22.0);
        // Children spawn at default speed, not the parent's
        assert_eq!(children[0].speed, 1.0);
    }

    #[test]
    fn test_medium_splits_into_two_small() {
        let children = subdivide(&rock(AsteroidTier::Medium), 1.0, || 0.0);
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| c.tier == AsteroidTier::Small));
        assert!(children.iter().all(|c| c.radius == 15.0 && c.collision_radius == 12.0));
    }

    #[test]
    fn test_small_splits_into_four_dust() {
        let mut headings = [10.0, 20.0, 30.0, 40.0].into_iter();
        let children = subdivide(&rock(AsteroidTier::Small), 1.0, || headings.next().unwrap());
        assert_eq!(children.len(), 4);
        assert!(children.iter().all(|c| c.tier == AsteroidTier::Dust));
        assert!(children.iter().all(|c| c.speed == DUST_SPEED));
        assert_eq!(children[2].pos, Vec2::new(196.0, 95.0));
        assert_eq!(children[3].heading, 40.0);
    }

    #[test]
    fn test_dust_does_not_split() {
        assert!(split_rule(AsteroidTier::Dust).is_none());
        assert!(subdivide(&rock(AsteroidTier::Dust), 1.0, || 0.0).is_empty());
    }
}

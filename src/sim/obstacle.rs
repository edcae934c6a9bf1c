//! Obstacles: walls with a passable gap that scroll leftward
//!
//! Gap placement goes through [`GapSource`] so tests can pin it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, slotted_wall_hit};
use super::config::SimConfig;

/// Picks the top of a new obstacle's gap within `[min, max]`
///
/// Callers guarantee `min <= max`.
pub trait GapSource {
    fn gap_top(&mut self, min: f32, max: f32) -> f32;
}

/// Uniform placement from a seeded PCG stream
#[derive(Debug, Clone)]
pub struct SeededGaps {
    rng: Pcg32,
}

impl SeededGaps {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl GapSource for SeededGaps {
    fn gap_top(&mut self, min: f32, max: f32) -> f32 {
        self.rng.random_range(min..=max)
    }
}

/// Always the same gap top, clamped into the allowed range
#[derive(Debug, Clone, Copy)]
pub struct FixedGap(pub f32);

impl GapSource for FixedGap {
    fn gap_top(&mut self, min: f32, max: f32) -> f32 {
        self.0.clamp(min, max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    id: u32,
    /// Leading (left) edge
    pub(crate) x: f32,
    width: f32,
    speed: f32,
    gap_top: f32,
    gap_bottom: f32,
    /// Set once the trailing edge is behind the actor; never cleared
    pub(crate) passed: bool,
}

impl Obstacle {
    /// New obstacle just past the right edge of the field
    ///
    /// If the field is too short for the gap and margins the placement range
    /// collapses to its lower bound. [`SimConfig::validate`] rejects such
    /// fields before a session starts.
    pub fn spawn(id: u32, config: &SimConfig, gaps: &mut impl GapSource) -> Self {
        let (min, max) = Self::gap_range(config);
        let gap_top = if max > min { gaps.gap_top(min, max) } else { min };
        Self::with_gap(id, config, config.field_width, gap_top)
    }

    /// Obstacle at an explicit position and gap
    pub fn with_gap(id: u32, config: &SimConfig, x: f32, gap_top: f32) -> Self {
        Self {
            id,
            x,
            width: config.obstacle_width,
            speed: config.obstacle_speed,
            gap_top,
            gap_bottom: gap_top + config.gap_size,
            passed: false,
        }
    }

    /// Allowed range for the gap top
    pub fn gap_range(config: &SimConfig) -> (f32, f32) {
        let min = config.gap_margin_top;
        let max = config.field_height - config.gap_size - config.gap_margin_bottom;
        (min, max)
    }

    pub fn advance(&mut self) {
        self.x -= self.speed;
    }

    pub fn collides_with(&self, bounds: &Aabb) -> bool {
        slotted_wall_hit(bounds, self.x, self.width, self.gap_top, self.gap_bottom)
    }

    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Trailing edge is strictly left of `actor_x`
    #[inline]
    pub fn is_behind(&self, actor_x: f32) -> bool {
        self.trailing_edge() < actor_x
    }

    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.trailing_edge() < 0.0
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_top
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_bottom
    }

    #[inline]
    pub fn passed(&self) -> bool {
        self.passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_spawn_at_right_edge() {
        let config = SimConfig::default();
        let obstacle = Obstacle::spawn(1, &config, &mut FixedGap(200.0));
        assert_eq!(obstacle.x(), 800.0);
        assert_eq!(obstacle.gap_top(), 200.0);
        assert_eq!(obstacle.gap_bottom(), 350.0);
        assert!(!obstacle.passed());
    }

    #[test]
    fn test_seeded_gaps_stay_in_range() {
        let config = SimConfig::default();
        let mut gaps = SeededGaps::new(42);
        for _ in 0..500 {
            let obstacle = Obstacle::spawn(1, &config, &mut gaps);
            assert!(obstacle.gap_top() >= 50.0);
            assert!(obstacle.gap_top() <= 400.0);
            assert!((obstacle.gap_bottom() - obstacle.gap_top() - 150.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_seeded_gaps_are_reproducible() {
        let config = SimConfig::default();
        let mut a = SeededGaps::new(7);
        let mut b = SeededGaps::new(7);
        for _ in 0..10 {
            assert_eq!(
                Obstacle::spawn(1, &config, &mut a).gap_top(),
                Obstacle::spawn(1, &config, &mut b).gap_top()
            );
        }
    }

    #[test]
    fn test_degenerate_range_uses_lower_bound() {
        // 200 tall field cannot hold 50 + 150 + 50
        let config = SimConfig::with_field(800.0, 200.0);
        let obstacle = Obstacle::spawn(1, &config, &mut SeededGaps::new(1));
        assert_eq!(obstacle.gap_top(), 50.0);

        // Exactly the minimum height: the range is a single point
        let config = SimConfig::with_field(800.0, 250.0);
        let obstacle = Obstacle::spawn(1, &config, &mut FixedGap(120.0));
        assert_eq!(obstacle.gap_top(), 50.0);
    }

    #[test]
    fn test_advance_moves_left() {
        let config = SimConfig::default();
        let mut obstacle = Obstacle::with_gap(1, &config, 400.0, 200.0);
        obstacle.advance();
        assert_eq!(obstacle.x(), 397.0);
        assert_eq!(obstacle.gap_top(), 200.0);
    }

    #[test]
    fn test_no_collision_when_far_and_inside_gap() {
        let config = SimConfig::default();
        let obstacle = Obstacle::with_gap(1, &config, 400.0, 200.0);
        let bounds = Aabb::centered(Vec2::new(100.0, 300.0), 40.0, 30.0);
        assert!(!obstacle.collides_with(&bounds));
    }

    #[test]
    fn test_collision_when_overlapping_outside_gap() {
        let config = SimConfig::default();
        let obstacle = Obstacle::with_gap(1, &config, 90.0, 50.0);
        let bounds = Aabb::centered(Vec2::new(100.0, 300.0), 40.0, 30.0);
        assert!(obstacle.collides_with(&bounds));
    }

    #[test]
    fn test_offscreen_and_behind() {
        let config = SimConfig::default();
        let mut obstacle = Obstacle::with_gap(1, &config, 40.0, 200.0);
        assert!(!obstacle.is_behind(100.0));
        obstacle.x = 39.0;
        assert!(obstacle.is_behind(100.0));

        obstacle.x = -60.0;
        assert!(!obstacle.is_offscreen());
        obstacle.x = -61.0;
        assert!(obstacle.is_offscreen());
    }
}

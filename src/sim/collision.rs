//! Collision detection for boxes against slotted walls
//!
//! Everything is axis-aligned: the actor is a box, an obstacle is a vertical
//! wall of fixed width with a passable window cut out of it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of the given size centered on `center`
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        let half = Vec2::new(width / 2.0, height / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap of the horizontal extent with `[x0, x1]`
    ///
    /// Touching edges do not count.
    #[inline]
    pub fn overlaps_span_x(&self, x0: f32, x1: f32) -> bool {
        self.right() > x0 && self.left() < x1
    }

    /// True if the box pokes out of the vertical band `[y0, y1]`
    #[inline]
    pub fn escapes_band_y(&self, y0: f32, y1: f32) -> bool {
        self.top() < y0 || self.bottom() > y1
    }
}

/// Test a box against a wall spanning `[wall_x, wall_x + wall_width]` that is
/// solid everywhere except the window `[gap_top, gap_bottom]`.
pub fn slotted_wall_hit(
    bounds: &Aabb,
    wall_x: f32,
    wall_width: f32,
    gap_top: f32,
    gap_bottom: f32,
) -> bool {
    bounds.overlaps_span_x(wall_x, wall_x + wall_width)
        && bounds.escapes_band_y(gap_top, gap_bottom)
}

//! The player-controlled actor
//!
//! Explicit Euler integration with constant gravity and a constant jump
//! impulse. The actor never clamps itself; leaving the field is detected by
//! the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::config::SimConfig;
use crate::consts::{MAX_TILT, POSE_DIVE_VELOCITY, TILT_PER_VELOCITY};

/// Sprite pose, derived from velocity
///
/// Render-only: nothing in the simulation reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    /// Rising
    Up,
    /// Gliding or just past the apex
    Level,
    /// Falling fast
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Center of the actor; `x` never changes after spawn
    pub(crate) pos: Vec2,
    /// Vertical velocity per tick (positive is down)
    pub(crate) vel: f32,
    gravity: f32,
    impulse: f32,
    width: f32,
    height: f32,
}

impl Actor {
    /// Spawn at the configured x, vertically centered, at rest
    pub fn spawn(config: &SimConfig) -> Self {
        Self {
            pos: Vec2::new(config.actor_x, config.actor_spawn_y()),
            vel: 0.0,
            gravity: config.gravity,
            impulse: config.jump_impulse,
            width: config.actor_width,
            height: config.actor_height,
        }
    }

    /// Set velocity to the jump impulse, whatever it was before
    pub fn apply_impulse(&mut self) {
        self.vel = self.impulse;
    }

    /// One tick of integration: velocity first, then position
    pub fn advance(&mut self) {
        self.vel += self.gravity;
        self.pos.y += self.vel;
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::centered(self.pos, self.width, self.height)
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn vel(&self) -> f32 {
        self.vel
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn pose(&self) -> Pose {
        if self.vel < 0.0 {
            Pose::Up
        } else if self.vel > POSE_DIVE_VELOCITY {
            Pose::Down
        } else {
            Pose::Level
        }
    }

    /// Rotation in radians for drawing, proportional to velocity and clamped
    pub fn tilt(&self) -> f32 {
        (self.vel * TILT_PER_VELOCITY).clamp(-MAX_TILT, MAX_TILT)
    }
}

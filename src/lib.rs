//! Skyflap - a gravity-and-gaps arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actor physics, obstacles, collisions, game state)
//! - `audio`: Sound cue dispatch driven by simulation events
//! - `settings`: Player preferences
//! - `highscores`: Local leaderboard
//! - `persistence`: JSON file storage

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;
pub use sim::{GameEvent, GamePhase, Input, SimConfig, Simulation};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Actor defaults
    pub const ACTOR_X: f32 = 100.0;
    pub const ACTOR_WIDTH: f32 = 40.0;
    pub const ACTOR_HEIGHT: f32 = 30.0;

    /// Downward acceleration applied every tick
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -8.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_SPEED: f32 = 3.0;
    pub const GAP_SIZE: f32 = 150.0;
    pub const GAP_MARGIN_TOP: f32 = 50.0;
    pub const GAP_MARGIN_BOTTOM: f32 = 50.0;

    /// Milliseconds between obstacle spawns
    pub const SPAWN_INTERVAL_MS: f64 = 2000.0;

    /// Velocity above which the actor is drawn nose-down
    pub const POSE_DIVE_VELOCITY: f32 = 2.0;
    /// Radians of tilt per unit of velocity, and the tilt clamp
    pub const TILT_PER_VELOCITY: f32 = 0.1;
    pub const MAX_TILT: f32 = 0.5;
}

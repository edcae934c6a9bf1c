//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes from the caller, never read internally
//! - Injected gap source only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering, audio or storage dependencies

pub mod actor;
pub mod collision;
pub mod config;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use actor::{Actor, Pose};
pub use collision::{Aabb, slotted_wall_hit};
pub use config::{ConfigError, SimConfig};
pub use obstacle::{FixedGap, GapSource, Obstacle, SeededGaps};
pub use state::{
    GameEvent, GamePhase, NullObserver, ObstacleView, SimObserver, Simulation, Snapshot,
    SpawnTimer,
};
pub use tick::Input;

//! Simulation tuning, fixed for a session
//!
//! Loaded from JSON (missing fields fall back to [`crate::consts`]) and
//! validated before a [`Simulation`](super::Simulation) is built from it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a configuration cannot be used to run a session
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("field height {height} is below the minimum playable height {minimum} (gap + margins)")]
    FieldTooShort { height: f32, minimum: f32 },
    #[error("actor {width}x{height} at x={x} does not fit a {field_width}x{field_height} field")]
    ActorOutOfField {
        x: f32,
        width: f32,
        height: f32,
        field_width: f32,
        field_height: f32,
    },
    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("gap margins must not be negative")]
    NegativeMargin,
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Every tunable the simulation consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub field_width: f32,
    pub field_height: f32,

    /// Fixed horizontal position of the actor's center
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,

    /// Added to the actor's velocity every tick
    pub gravity: f32,
    /// Velocity the actor is set to on a jump (negative is up)
    pub jump_impulse: f32,

    pub obstacle_width: f32,
    /// Distance an obstacle moves left per tick
    pub obstacle_speed: f32,
    /// Height of the passable window
    pub gap_size: f32,
    pub gap_margin_top: f32,
    pub gap_margin_bottom: f32,

    /// Minimum time between spawns, same unit as tick timestamps (ms)
    pub spawn_interval: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            actor_x: ACTOR_X,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_speed: OBSTACLE_SPEED,
            gap_size: GAP_SIZE,
            gap_margin_top: GAP_MARGIN_TOP,
            gap_margin_bottom: GAP_MARGIN_BOTTOM,
            spawn_interval: SPAWN_INTERVAL_MS,
        }
    }
}

impl SimConfig {
    /// Defaults with a different field size
    pub fn with_field(width: f32, height: f32) -> Self {
        Self {
            field_width: width,
            field_height: height,
            ..Self::default()
        }
    }

    /// Smallest field height that still leaves room for a gap and both margins
    pub fn min_field_height(&self) -> f32 {
        self.gap_margin_top + self.gap_size + self.gap_margin_bottom
    }

    /// Center of the field vertically, where the actor spawns
    pub fn actor_spawn_y(&self) -> f32 {
        self.field_height / 2.0
    }

    /// Check every precondition the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let all: [(&'static str, f64); 13] = [
            ("field_width", self.field_width as f64),
            ("field_height", self.field_height as f64),
            ("actor_x", self.actor_x as f64),
            ("actor_width", self.actor_width as f64),
            ("actor_height", self.actor_height as f64),
            ("gravity", self.gravity as f64),
            ("jump_impulse", self.jump_impulse as f64),
            ("obstacle_width", self.obstacle_width as f64),
            ("obstacle_speed", self.obstacle_speed as f64),
            ("gap_size", self.gap_size as f64),
            ("gap_margin_top", self.gap_margin_top as f64),
            ("gap_margin_bottom", self.gap_margin_bottom as f64),
            ("spawn_interval", self.spawn_interval),
        ];
        if let Some(&(name, value)) = all.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite { name, value });
        }

        let positives: [(&'static str, f64); 8] = [
            ("field_width", self.field_width as f64),
            ("field_height", self.field_height as f64),
            ("actor_width", self.actor_width as f64),
            ("actor_height", self.actor_height as f64),
            ("obstacle_width", self.obstacle_width as f64),
            ("obstacle_speed", self.obstacle_speed as f64),
            ("gap_size", self.gap_size as f64),
            ("spawn_interval", self.spawn_interval),
        ];
        for (name, value) in positives {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if !(self.gap_margin_top >= 0.0 && self.gap_margin_bottom >= 0.0) {
            return Err(ConfigError::NegativeMargin);
        }

        let minimum = self.min_field_height();
        if self.field_height < minimum {
            return Err(ConfigError::FieldTooShort {
                height: self.field_height,
                minimum,
            });
        }

        // The actor must start strictly inside the field, or the first tick ends the game
        let half_w = self.actor_width / 2.0;
        let half_h = self.actor_height / 2.0;
        let fits_x = self.actor_x - half_w >= 0.0 && self.actor_x + half_w <= self.field_width;
        let fits_y = half_h * 2.0 < self.field_height;
        if !fits_x || !fits_y {
            return Err(ConfigError::ActorOutOfField {
                x: self.actor_x,
                width: self.actor_width,
                height: self.actor_height,
                field_width: self.field_width,
                field_height: self.field_height,
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded sim config from {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
        assert_eq!(SimConfig::default().min_field_height(), 250.0);
    }

    #[test]
    fn test_field_too_short() {
        let config = SimConfig::with_field(800.0, 200.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FieldTooShort { minimum, .. }) if minimum == 250.0
        ));
    }

    #[test]
    fn test_minimum_height_is_accepted() {
        let config = SimConfig::with_field(800.0, 250.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_positive_rejected() {
        let config = SimConfig {
            obstacle_speed: 0.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "obstacle_speed", .. })
        ));

        let config = SimConfig {
            gap_margin_bottom: -1.0,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NegativeMargin)));
    }

    #[test]
    fn test_non_finite_rejected() {
        let tweaks: [(&str, fn(&mut SimConfig)); 6] = [
            ("gap_margin_top", |c| c.gap_margin_top = f32::NAN),
            ("gap_margin_bottom", |c| c.gap_margin_bottom = f32::NAN),
            ("gravity", |c| c.gravity = f32::NAN),
            ("jump_impulse", |c| c.jump_impulse = f32::INFINITY),
            ("actor_x", |c| c.actor_x = f32::NAN),
            ("spawn_interval", |c| c.spawn_interval = f64::NAN),
        ];
        for (field, tweak) in tweaks {
            let mut config = SimConfig::default();
            tweak(&mut config);
            match config.validate() {
                Err(ConfigError::NotFinite { name, .. }) => assert_eq!(name, field),
                other => panic!("{field}: expected NotFinite, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_nan_gravity_cannot_build_a_session() {
        let config = SimConfig {
            gravity: f32::NAN,
            ..SimConfig::default()
        };
        assert!(crate::sim::Simulation::new(config, 1).is_err());
    }

    #[test]
    fn test_actor_outside_field_rejected() {
        let config = SimConfig {
            actor_x: 10.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ActorOutOfField { .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json_str(r#"{ "gravity": 0.25, "field_height": 480 }"#)
            .expect("valid config");
        assert_eq!(config.gravity, 0.25);
        assert_eq!(config.field_height, 480.0);
        assert_eq!(config.field_width, FIELD_WIDTH);
        assert_eq!(config.jump_impulse, JUMP_IMPULSE);
    }

    #[test]
    fn test_json_validation_runs() {
        let err = SimConfig::from_json_str(r#"{ "field_height": 100 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::FieldTooShort { .. }));

        let err = SimConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

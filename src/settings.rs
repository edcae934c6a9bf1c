//! Player preferences
//!
//! Persisted as JSON, separately from the leaderboard.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name scores are submitted under; `None` until the player picks one
    pub player_name: Option<String>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything without losing the volume levels
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Set the player name, trimmed. Blank names are rejected.
    pub fn set_player_name(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.player_name = Some(name.to_string());
        true
    }

    /// Forget the player name so the next session asks again
    pub fn clear_player_name(&mut self) {
        self.player_name = None;
    }

    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = clamp_volume(vol);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = clamp_volume(vol);
    }

    /// Load settings, falling back to defaults
    pub fn load(path: &Path) -> Self {
        persistence::load_or_default(path, "settings")
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::write_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

fn clamp_volume(vol: f32) -> f32 {
    if vol.is_nan() { 0.0 } else { vol.clamp(0.0, 1.0) }
}

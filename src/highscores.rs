//! High score leaderboard system
//!
//! Persisted as JSON, tracks the top 10 scores across players.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub player_name: String,
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted by descending score
///
/// Personal bests are tracked per player for every positive score, so a run
/// that misses the board (or an entry later pushed off it) still counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    #[serde(default)]
    pub personal_bests: BTreeMap<String, u32>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot a new score would take on the board, below any equal scores
    fn slot_for(&self, score: u32) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let slot = self.entries.partition_point(|e| e.score >= score);
        (slot < MAX_HIGH_SCORES).then_some(slot)
    }

    /// Whether a score would make the board. Zero never does.
    pub fn qualifies(&self, score: u32) -> bool {
        self.slot_for(score).is_some()
    }

    /// Rank (1-indexed) a score would get, None if it misses the board
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        self.slot_for(score).map(|slot| slot + 1)
    }

    /// Record a finished run. Returns the rank achieved (1-indexed) or None
    /// if it didn't make the board.
    ///
    /// Ties rank below existing entries with the same score. The player's
    /// personal best is updated either way.
    pub fn submit(&mut self, player_name: &str, score: u32, timestamp: f64) -> Option<usize> {
        if score > 0 {
            let best = self.personal_bests.entry(player_name.to_string()).or_default();
            *best = (*best).max(score);
        }

        let slot = self.slot_for(score)?;
        self.entries.insert(
            slot,
            HighScoreEntry {
                player_name: player_name.to_string(),
                score,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);

        log::info!("{} scored {} (rank {})", player_name, score, slot + 1);
        Some(slot + 1)
    }

    /// Entries recorded under `player_name`, best first
    pub fn for_player<'a>(
        &'a self,
        player_name: &'a str,
    ) -> impl Iterator<Item = &'a HighScoreEntry> + 'a {
        self.entries.iter().filter(move |e| e.player_name == player_name)
    }

    /// Best score ever submitted under `player_name`, 0 if none
    pub fn personal_best(&self, player_name: &str) -> u32 {
        self.personal_bests.get(player_name).copied().unwrap_or(0)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores, starting fresh if the file is missing or corrupt
    pub fn load(path: &Path) -> Self {
        let mut scores: Self = persistence::load_or_default(path, "high scores");
        // Hand-edited files may be out of order
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        // Files written before bests were tracked only have board entries
        for entry in &scores.entries {
            let best = scores
                .personal_bests
                .entry(entry.player_name.clone())
                .or_default();
            *best = (*best).max(entry.score);
        }
        scores
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::write_json(path, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Text for sharing a result
pub fn share_message(score: u32) -> String {
    format!("I scored {} points in Skyflap!", score)
}

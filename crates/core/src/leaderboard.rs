//! Leaderboard module - bounded, score-sorted history of finished games

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pattern_pulse_types::{Difficulty, DEFAULT_PLAYER_NAME, MAX_HIGH_SCORES};

/// One leaderboard row. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub id: Uuid,
    pub player_name: String,
    pub score: u32,
    pub difficulty: Difficulty,
    pub date: DateTime<Utc>,
    pub level_reached: u32,
}

impl HighScoreEntry {
    /// Draft entry for a just-ended game, carrying the default name until
    /// the player confirms one.
    pub fn draft(score: u32, difficulty: Difficulty, level_reached: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            score,
            difficulty,
            date: Utc::now(),
            level_reached,
        }
    }

    /// Finalize the draft with the player's chosen name. Whitespace is
    /// trimmed; an empty result falls back to the default label.
    pub fn with_name(mut self, name: &str) -> Self {
        let trimmed = name.trim();
        self.player_name = if trimmed.is_empty() {
            DEFAULT_PLAYER_NAME.to_string()
        } else {
            trimmed.to_string()
        };
        self
    }
}

/// Bounded leaderboard, kept sorted by score descending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighScoreBoard {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreBoard {
    pub fn new(entries: Vec<HighScoreEntry>) -> Self {
        let mut board = Self { entries };
        board.normalize();
        board
    }

    /// Insert an entry, re-sort, and truncate to the top 10. Callers only
    /// submit entries with a positive score.
    pub fn submit(&mut self, entry: HighScoreEntry) {
        self.entries.push(entry);
        self.normalize();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn normalize(&mut self) {
        // Stable sort keeps earlier submissions ahead on ties.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

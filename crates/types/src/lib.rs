//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no game logic, making them usable
//! in any context (core logic, the async engine, terminal rendering, storage).
//!
//! # Grid
//!
//! The playfield is a fixed 3x3 grid of cards:
//!
//! - **Cards**: 9, indexed 0-8 in row-major order
//! - **Images**: drawn from a fixed pool of 18 motifs, 9 sampled per game
//!
//! # Timing Constants
//!
//! All gameplay timing is in seconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LEAD_IN_SECS` | 0.5 | Pause before the first card of a reveal |
//! | `INTER_CARD_PAUSE_SECS` | 0.2 | Gap between revealed cards |
//! | `FEEDBACK_PAUSE_SECS` | 1.0 | Post-evaluation display pause |
//! | `COUNTDOWN_TICK_SECS` | 0.1 | Countdown resolution during the player turn |
//!
//! # Difficulty Tables
//!
//! Pattern length, reveal speed and the response time limit all derive from
//! the difficulty plus the current level; the per-difficulty bases live here
//! and the formulas live in `pattern-pulse-core`.

use serde::{Deserialize, Serialize};

/// Number of cards on the grid (3x3).
pub const GRID_SIZE: usize = 9;

/// Lives a fresh session starts with.
pub const STARTING_LIVES: u8 = 3;

/// Maximum number of leaderboard entries kept.
pub const MAX_HIGH_SCORES: usize = 10;

/// Name recorded when the player leaves the name prompt empty.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Pause before the first card of a reveal is shown.
pub const LEAD_IN_SECS: f64 = 0.5;

/// Gap between one card hiding and the next card showing.
pub const INTER_CARD_PAUSE_SECS: f64 = 0.2;

/// How long evaluation feedback stays on screen.
pub const FEEDBACK_PAUSE_SECS: f64 = 1.0;

/// Countdown timer resolution.
pub const COUNTDOWN_TICK_SECS: f64 = 0.1;

/// Reveal speed never drops below this, however high the level.
pub const MIN_DISPLAY_SPEED_SECS: f64 = 0.3;

/// Response window never shrinks below this.
pub const MIN_TIME_LIMIT_SECS: f64 = 10.0;

/// Fixed pool of card motifs; 9 distinct entries are sampled per game.
pub const IMAGE_POOL: [&str; 18] = [
    "bell", "candle", "candy", "deer", "elf", "gift", "holly", "lantern",
    "mitten", "robin", "santa", "sled", "snowflake", "snowman", "sock",
    "star", "tree", "wreath",
];

/// Difficulty setting chosen at the start of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Starting pattern length before the level bonus.
    pub fn base_length(&self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
        }
    }

    /// Seconds each card stays face-up at level 0.
    pub fn base_speed(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.2,
            Difficulty::Medium => 0.9,
            Difficulty::Hard => 0.6,
        }
    }

    /// Response window in seconds at level 0.
    pub fn base_time(&self) -> f64 {
        match self {
            Difficulty::Easy => 30.0,
            Difficulty::Medium => 25.0,
            Difficulty::Hard => 20.0,
        }
    }

    /// Points awarded for any correct round at this difficulty.
    pub fn base_score(&self) -> u32 {
        match self {
            Difficulty::Easy => 100,
            Difficulty::Medium => 200,
            Difficulty::Hard => 300,
        }
    }

    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Convert to display string
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Phase of a game session.
///
/// `Completed` is a reserved success terminal; sessions currently loop
/// through levels until they fail, so it is never entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    Waiting,
    ShowingPattern,
    PlayerTurn,
    Evaluating,
    Completed,
    Failed,
}

impl GamePhase {
    /// Whether the session has ended and accepts no further play.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Completed | GamePhase::Failed)
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Waiting => "waiting",
            GamePhase::ShowingPattern => "showingPattern",
            GamePhase::PlayerTurn => "playerTurn",
            GamePhase::Evaluating => "evaluating",
            GamePhase::Completed => "completed",
            GamePhase::Failed => "failed",
        }
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        GamePhase::Waiting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_tables() {
        assert_eq!(Difficulty::Easy.base_length(), 2);
        assert_eq!(Difficulty::Medium.base_length(), 3);
        assert_eq!(Difficulty::Hard.base_length(), 4);

        assert_eq!(Difficulty::Easy.base_score(), 100);
        assert_eq!(Difficulty::Hard.base_score(), 300);

        assert!(Difficulty::Hard.base_speed() < Difficulty::Easy.base_speed());
        assert!(Difficulty::Hard.base_time() < Difficulty::Easy.base_time());
    }

    #[test]
    fn test_difficulty_round_trip() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_difficulty_serde_strings() {
        // Persisted sessions use the capitalized raw values.
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");
        let back: Difficulty = serde_json::from_str("\"Hard\"").unwrap();
        assert_eq!(back, Difficulty::Hard);
    }

    #[test]
    fn test_phase_serde_strings() {
        let json = serde_json::to_string(&GamePhase::ShowingPattern).unwrap();
        assert_eq!(json, "\"showingPattern\"");
        let back: GamePhase = serde_json::from_str("\"playerTurn\"").unwrap();
        assert_eq!(back, GamePhase::PlayerTurn);
    }

    #[test]
    fn test_phase_terminal() {
        assert!(GamePhase::Failed.is_terminal());
        assert!(GamePhase::Completed.is_terminal());
        assert!(!GamePhase::PlayerTurn.is_terminal());
        assert!(!GamePhase::Waiting.is_terminal());
    }

    #[test]
    fn test_image_pool_distinct() {
        let mut names: Vec<&str> = IMAGE_POOL.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), IMAGE_POOL.len());
        assert!(IMAGE_POOL.len() >= GRID_SIZE);
    }
}

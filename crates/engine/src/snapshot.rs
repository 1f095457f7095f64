//! Immutable state snapshots published to presentation
//!
//! The controller owns all mutable state; after every transition it sends a
//! fresh snapshot over a watch channel. Renderers and tests only ever see
//! these copies.

use pattern_pulse_core::{GameSession, GridCard, HighScoreEntry};
use pattern_pulse_types::{Difficulty, GamePhase};

/// Everything presentation needs to draw a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSnapshot {
    /// The live session, if any.
    pub session: Option<GameSession>,
    /// Convenience copy of the session phase (`Waiting` when no session).
    pub phase: GamePhase,
    /// The 9 grid cards in row-major order.
    pub cards: Vec<GridCard>,
    /// Leaderboard, sorted by score descending.
    pub high_scores: Vec<HighScoreEntry>,
    /// Resumable sessions on disk.
    pub saved_sessions: Vec<GameSession>,
    /// Draft leaderboard entry awaiting a player name, set when a game
    /// just ended with a positive score.
    pub pending_entry: Option<HighScoreEntry>,
    /// Difficulty of the most recently started or resumed game.
    pub last_difficulty: Difficulty,
}

impl EngineSnapshot {
    /// Whether the name prompt should be shown.
    pub fn awaiting_name(&self) -> bool {
        self.pending_entry.is_some()
    }
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            session: None,
            phase: GamePhase::Waiting,
            cards: Vec::new(),
            high_scores: Vec::new(),
            saved_sessions: Vec::new(),
            pending_entry: None,
            last_difficulty: Difficulty::Medium,
        }
    }
}

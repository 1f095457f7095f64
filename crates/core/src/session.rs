//! Session module - one in-progress or concluded play-through
//!
//! The session is the unit of persistence and the single mutable record the
//! controller drives through the phase machine. Collaborators (reveal,
//! countdown, presentation) never mutate it directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pattern_pulse_types::{Difficulty, GamePhase, STARTING_LIVES};

use crate::pattern::Pattern;

/// Outcome of offering a tap to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Tap arrived outside the player turn or after input was already full.
    Ignored,
    /// Tap recorded; more cards are still expected.
    Accepted,
    /// Tap recorded and the input now matches the pattern length.
    Complete,
}

/// One play-through of the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: Uuid,
    pub difficulty: Difficulty,
    pub current_level: u32,
    pub score: u32,
    pub lives: u8,
    pub current_pattern: Option<Pattern>,
    pub player_input: Vec<usize>,
    pub phase: GamePhase,
    pub started_at: DateTime<Utc>,
    pub time_remaining: f64,
}

impl GameSession {
    /// Start a fresh session at level 1 with full lives.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            id: Uuid::new_v4(),
            difficulty,
            current_level: 1,
            score: 0,
            lives: STARTING_LIVES,
            current_pattern: None,
            player_input: Vec::new(),
            phase: GamePhase::Waiting,
            started_at: Utc::now(),
            time_remaining: difficulty.base_time(),
        }
    }

    /// Whether the session can still be played.
    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    /// Install a freshly generated pattern. Input is cleared here and
    /// nowhere else except evaluation completion.
    pub fn set_pattern(&mut self, pattern: Pattern) {
        self.player_input.clear();
        self.current_pattern = Some(pattern);
    }

    /// Record a player tap during the player turn.
    ///
    /// Taps outside `PlayerTurn`, without a pattern, or once the input has
    /// already reached the pattern length are ignored.
    pub fn record_tap(&mut self, index: usize) -> TapOutcome {
        if self.phase != GamePhase::PlayerTurn {
            return TapOutcome::Ignored;
        }
        let Some(pattern) = self.current_pattern.as_ref() else {
            return TapOutcome::Ignored;
        };
        if self.player_input.len() >= pattern.len() {
            return TapOutcome::Ignored;
        }

        self.player_input.push(index);
        if self.player_input.len() == pattern.len() {
            TapOutcome::Complete
        } else {
            TapOutcome::Accepted
        }
    }

    /// Element-wise ordered comparison of the full input against the
    /// pattern. Only meaningful once the input has reached full length.
    pub fn input_matches_pattern(&self) -> bool {
        match self.current_pattern.as_ref() {
            Some(pattern) => self.player_input == pattern.sequence,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern;
    use crate::rng::SimpleRng;

    fn session_in_turn(seed: u32) -> GameSession {
        let mut rng = SimpleRng::new(seed);
        let mut session = GameSession::new(Difficulty::Easy);
        session.set_pattern(pattern::generate(1, Difficulty::Easy, &mut rng));
        session.phase = GamePhase::PlayerTurn;
        session
    }

    #[test]
    fn test_new_session_defaults() {
        let session = GameSession::new(Difficulty::Medium);

        assert_eq!(session.current_level, 1);
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, STARTING_LIVES);
        assert!(session.current_pattern.is_none());
        assert!(session.player_input.is_empty());
        assert_eq!(session.phase, GamePhase::Waiting);
        assert!(session.is_alive());
    }

    #[test]
    fn test_set_pattern_clears_input() {
        let mut session = session_in_turn(1);
        session.record_tap(0);
        assert_eq!(session.player_input.len(), 1);

        let mut rng = SimpleRng::new(2);
        session.set_pattern(pattern::generate(1, Difficulty::Easy, &mut rng));
        assert!(session.player_input.is_empty());
    }

    #[test]
    fn test_tap_outside_player_turn_ignored() {
        let mut session = session_in_turn(1);
        session.phase = GamePhase::ShowingPattern;

        assert_eq!(session.record_tap(3), TapOutcome::Ignored);
        assert!(session.player_input.is_empty());
    }

    #[test]
    fn test_tap_without_pattern_ignored() {
        let mut session = GameSession::new(Difficulty::Easy);
        session.phase = GamePhase::PlayerTurn;

        assert_eq!(session.record_tap(0), TapOutcome::Ignored);
    }

    #[test]
    fn test_tap_sequence_completes_at_full_length() {
        let mut session = session_in_turn(1);
        let len = session.current_pattern.as_ref().unwrap().len();
        assert_eq!(len, 2); // easy, level 1

        assert_eq!(session.record_tap(5), TapOutcome::Accepted);
        assert_eq!(session.record_tap(7), TapOutcome::Complete);
        assert_eq!(session.player_input, vec![5, 7]);
    }

    #[test]
    fn test_tap_after_full_input_ignored() {
        let mut session = session_in_turn(1);
        session.record_tap(0);
        session.record_tap(1);

        assert_eq!(session.record_tap(2), TapOutcome::Ignored);
        assert_eq!(session.player_input.len(), 2);
    }

    #[test]
    fn test_input_matches_pattern_ordered() {
        let mut session = session_in_turn(1);
        let target = session.current_pattern.as_ref().unwrap().sequence.clone();

        for &i in &target {
            session.record_tap(i);
        }
        assert!(session.input_matches_pattern());

        // Same multiset, different order, must not match (unless the
        // pattern happens to be order-insensitive, which [a, b] with
        // a != b is not).
        if target[0] != target[1] {
            let mut reversed = session.clone();
            reversed.player_input = vec![target[1], target[0]];
            assert!(!reversed.input_matches_pattern());
        }
    }

    #[test]
    fn test_session_serde_round_trip() {
        let mut rng = SimpleRng::new(9);
        let mut session = GameSession::new(Difficulty::Hard);
        session.set_pattern(pattern::generate(4, Difficulty::Hard, &mut rng));
        session.score = 730;
        session.lives = 1;

        let json = serde_json::to_string(&session).unwrap();
        let back: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}

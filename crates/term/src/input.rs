//! Key mapping for the terminal front end.
//!
//! Maps crossterm key events to engine commands, with a small amount of
//! local state for the high-score name prompt (typed text lives here until
//! the player confirms or cancels).

use crossterm::event::{KeyCode, KeyEvent};

use pattern_pulse_engine::{EngineCommand, EngineSnapshot};
use pattern_pulse_types::Difficulty;

/// What the front end should do with a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Quit,
    Engine(EngineCommand),
}

/// Stateful key-to-command mapper.
#[derive(Debug, Default)]
pub struct InputMapper {
    name_buffer: String,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text typed so far into the name prompt.
    pub fn name_buffer(&self) -> &str {
        &self.name_buffer
    }

    /// Translate a key press given the current snapshot.
    ///
    /// While a high-score draft is pending, keys feed the name prompt;
    /// otherwise they map to game commands. Unknown keys return `None`.
    pub fn handle_key(&mut self, key: KeyEvent, snapshot: &EngineSnapshot) -> Option<UiAction> {
        if snapshot.awaiting_name() {
            return self.handle_name_key(key.code);
        }

        match key.code {
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                Some(UiAction::Engine(EngineCommand::CardTap(index)))
            }
            KeyCode::Char('e') => Some(UiAction::Engine(EngineCommand::StartNewGame(
                Difficulty::Easy,
            ))),
            KeyCode::Char('m') => Some(UiAction::Engine(EngineCommand::StartNewGame(
                Difficulty::Medium,
            ))),
            KeyCode::Char('h') => Some(UiAction::Engine(EngineCommand::StartNewGame(
                Difficulty::Hard,
            ))),
            KeyCode::Char('r') => snapshot
                .saved_sessions
                .first()
                .map(|s| UiAction::Engine(EngineCommand::ResumeGame(s.id))),
            KeyCode::Char('x') => snapshot
                .saved_sessions
                .first()
                .map(|s| UiAction::Engine(EngineCommand::DeleteSession(s.id))),
            KeyCode::Char('c') => Some(UiAction::Engine(EngineCommand::ClearHighScores)),
            KeyCode::Char('q') | KeyCode::Esc => Some(UiAction::Quit),
            _ => None,
        }
    }

    fn handle_name_key(&mut self, code: KeyCode) -> Option<UiAction> {
        match code {
            KeyCode::Enter => {
                let name = std::mem::take(&mut self.name_buffer);
                Some(UiAction::Engine(EngineCommand::ConfirmHighScoreName(name)))
            }
            KeyCode::Esc => {
                self.name_buffer.clear();
                Some(UiAction::Engine(EngineCommand::CancelHighScoreName))
            }
            KeyCode::Backspace => {
                self.name_buffer.pop();
                None
            }
            KeyCode::Char(c) if !c.is_control() && self.name_buffer.len() < 24 => {
                self.name_buffer.push(c);
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pattern_pulse_core::{GameSession, HighScoreEntry};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn snapshot() -> EngineSnapshot {
        EngineSnapshot::default()
    }

    #[test]
    fn test_digit_keys_map_to_taps() {
        let mut mapper = InputMapper::new();
        let snap = snapshot();

        assert_eq!(
            mapper.handle_key(key(KeyCode::Char('1')), &snap),
            Some(UiAction::Engine(EngineCommand::CardTap(0)))
        );
        assert_eq!(
            mapper.handle_key(key(KeyCode::Char('9')), &snap),
            Some(UiAction::Engine(EngineCommand::CardTap(8)))
        );
        assert_eq!(mapper.handle_key(key(KeyCode::Char('0')), &snap), None);
    }

    #[test]
    fn test_difficulty_keys() {
        let mut mapper = InputMapper::new();
        let snap = snapshot();

        assert_eq!(
            mapper.handle_key(key(KeyCode::Char('e')), &snap),
            Some(UiAction::Engine(EngineCommand::StartNewGame(Difficulty::Easy)))
        );
        assert_eq!(
            mapper.handle_key(key(KeyCode::Char('h')), &snap),
            Some(UiAction::Engine(EngineCommand::StartNewGame(Difficulty::Hard)))
        );
    }

    #[test]
    fn test_resume_requires_saved_session() {
        let mut mapper = InputMapper::new();
        let mut snap = snapshot();
        assert_eq!(mapper.handle_key(key(KeyCode::Char('r')), &snap), None);

        let session = GameSession::new(Difficulty::Easy);
        let id = session.id;
        snap.saved_sessions.push(session);
        assert_eq!(
            mapper.handle_key(key(KeyCode::Char('r')), &snap),
            Some(UiAction::Engine(EngineCommand::ResumeGame(id)))
        );
    }

    #[test]
    fn test_quit_keys() {
        let mut mapper = InputMapper::new();
        let snap = snapshot();
        assert_eq!(
            mapper.handle_key(key(KeyCode::Char('q')), &snap),
            Some(UiAction::Quit)
        );
        assert_eq!(mapper.handle_key(key(KeyCode::Esc), &snap), Some(UiAction::Quit));
    }

    #[test]
    fn test_name_prompt_consumes_typing() {
        let mut mapper = InputMapper::new();
        let mut snap = snapshot();
        snap.pending_entry = Some(HighScoreEntry::draft(100, Difficulty::Easy, 2));

        assert_eq!(mapper.handle_key(key(KeyCode::Char('Z')), &snap), None);
        assert_eq!(mapper.handle_key(key(KeyCode::Char('o')), &snap), None);
        assert_eq!(mapper.name_buffer(), "Zo");

        // Digits go into the name, not the grid.
        assert_eq!(mapper.handle_key(key(KeyCode::Char('1')), &snap), None);
        assert_eq!(mapper.name_buffer(), "Zo1");

        assert_eq!(mapper.handle_key(key(KeyCode::Backspace), &snap), None);
        assert_eq!(
            mapper.handle_key(key(KeyCode::Enter), &snap),
            Some(UiAction::Engine(EngineCommand::ConfirmHighScoreName(
                "Zo".to_string()
            )))
        );
        assert_eq!(mapper.name_buffer(), "");
    }

    #[test]
    fn test_name_prompt_escape_cancels() {
        let mut mapper = InputMapper::new();
        let mut snap = snapshot();
        snap.pending_entry = Some(HighScoreEntry::draft(100, Difficulty::Easy, 2));

        mapper.handle_key(key(KeyCode::Char('A')), &snap);
        assert_eq!(
            mapper.handle_key(key(KeyCode::Esc), &snap),
            Some(UiAction::Engine(EngineCommand::CancelHighScoreName))
        );
        assert_eq!(mapper.name_buffer(), "");
    }

    // keep `_` fallthrough honest when a session is live
    #[test]
    fn test_unmapped_keys_ignored() {
        let mut mapper = InputMapper::new();
        let mut snap = snapshot();
        snap.session = Some(GameSession::new(Difficulty::Easy));
        assert_eq!(mapper.handle_key(key(KeyCode::Tab), &snap), None);
        assert_eq!(mapper.handle_key(key(KeyCode::Char('z')), &snap), None);
    }
}

//! GameView: maps an engine snapshot into terminal lines.
//!
//! This module is pure (no I/O). It can be unit-tested.

use pattern_pulse_core::GridCard;
use pattern_pulse_engine::EngineSnapshot;
use pattern_pulse_types::GamePhase;

/// Columns per grid cell, inside the brackets.
const CELL_WIDTH: usize = 12;

/// Render the snapshot into display lines, top to bottom.
///
/// `name_buffer` is the text typed so far into the high-score name prompt;
/// it is only shown while a draft entry is pending.
pub fn render(snapshot: &EngineSnapshot, name_buffer: &str) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("PATTERN PULSE".to_string());
    lines.push(String::new());

    match snapshot.session.as_ref() {
        Some(session) => {
            lines.push(format!(
                "{}  Level {}   Score {}   Lives {}   Time {:>5.1}s   [{}]",
                session.difficulty.as_str(),
                session.current_level,
                session.score,
                lives_markers(session.lives),
                session.time_remaining,
                session.phase.as_str(),
            ));
        }
        None => {
            lines.push("No game in progress - press e/m/h to start".to_string());
        }
    }
    lines.push(String::new());

    render_grid(snapshot, &mut lines);
    lines.push(String::new());

    match snapshot.phase {
        GamePhase::ShowingPattern => lines.push("Watch the pattern...".to_string()),
        GamePhase::PlayerTurn => lines.push("Your turn: repeat it with keys 1-9".to_string()),
        GamePhase::Evaluating => lines.push("Checking...".to_string()),
        GamePhase::Failed => lines.push("Game over!".to_string()),
        _ => {}
    }

    if snapshot.awaiting_name() {
        if let Some(draft) = snapshot.pending_entry.as_ref() {
            lines.push(format!(
                "New high score: {}! Enter your name: {}_",
                draft.score, name_buffer
            ));
        }
    }
    lines.push(String::new());

    if !snapshot.saved_sessions.is_empty() {
        lines.push("Saved games (r to resume, x to delete):".to_string());
        for s in &snapshot.saved_sessions {
            lines.push(format!(
                "  {} - level {}, score {}, {} lives",
                s.difficulty.as_str(),
                s.current_level,
                s.score,
                s.lives
            ));
        }
        lines.push(String::new());
    }

    if !snapshot.high_scores.is_empty() {
        lines.push("High scores (c to clear):".to_string());
        for (i, entry) in snapshot.high_scores.iter().enumerate() {
            lines.push(format!(
                "  {:>2}. {:<12} {:>6}  {}  level {}",
                i + 1,
                entry.player_name,
                entry.score,
                entry.difficulty.as_str(),
                entry.level_reached
            ));
        }
        lines.push(String::new());
    }

    lines.push("e/m/h new game   1-9 tap   q quit".to_string());
    lines
}

fn render_grid(snapshot: &EngineSnapshot, lines: &mut Vec<String>) {
    for row in 0..3 {
        let mut line = String::new();
        for col in 0..3 {
            let index = row * 3 + col;
            match snapshot.cards.get(index) {
                Some(card) => line.push_str(&cell(index, card)),
                None => line.push_str(&format!("[{:^width$}]", "", width = CELL_WIDTH)),
            }
            line.push(' ');
        }
        lines.push(line.trim_end().to_string());
    }
}

fn cell(index: usize, card: &GridCard) -> String {
    let key = index + 1;
    match (card.is_face_up, card.sequence_number) {
        (true, Some(n)) => format!("[{n:>2} {:<width$}]", card.image, width = CELL_WIDTH - 3),
        (true, None) => format!("[ {key} {:<width$}]", card.image, width = CELL_WIDTH - 3),
        (false, _) => format!("[ {key} {:<width$}]", "---", width = CELL_WIDTH - 3),
    }
}

fn lives_markers(lives: u8) -> String {
    let full = "*".repeat(lives as usize);
    let lost = "-".repeat((3u8.saturating_sub(lives)) as usize);
    format!("{full}{lost}")
}

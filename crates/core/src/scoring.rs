//! Scoring module - score, level advance, and life deduction rules
//!
//! All functions are pure over the session record; the controller decides
//! when to call them. One wrong full submission costs exactly one life no
//! matter how many of its taps were wrong; running out of time ends the
//! session outright.

use crate::session::GameSession;

/// Time bonus: up to 50 points, scaled by the remaining fraction of a
/// 30-second reference window, floored.
pub fn time_bonus(time_remaining: f64) -> u32 {
    ((time_remaining / 30.0) * 50.0).floor().max(0.0) as u32
}

/// Points a correct round is worth right now: difficulty base, plus the
/// time bonus at the moment of the match, plus 10 per level.
pub fn score_for(session: &GameSession) -> u32 {
    session.difficulty.base_score()
        + time_bonus(session.time_remaining)
        + session.current_level * 10
}

/// Correct full submission: bank the round score, advance a level, clear
/// the input for the next round.
pub fn apply_correct(session: &mut GameSession) {
    session.score += score_for(session);
    session.current_level += 1;
    session.player_input.clear();
}

/// Wrong full submission: exactly one life, input cleared.
pub fn apply_wrong(session: &mut GameSession) {
    session.lives = session.lives.saturating_sub(1);
    session.player_input.clear();
}

/// Countdown expiry: immediate session failure.
pub fn apply_timeout(session: &mut GameSession) {
    session.lives = 0;
}

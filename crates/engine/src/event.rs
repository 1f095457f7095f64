//! Engine commands and internal events
//!
//! Commands flow from presentation into the controller; events flow from
//! the timed tasks back into it. Events are tagged with the epoch of the
//! round that spawned them so a cancelled task's stragglers can be told
//! apart from live traffic.

use uuid::Uuid;

use pattern_pulse_types::Difficulty;

/// Presentation-facing input events.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    StartNewGame(Difficulty),
    ResumeGame(Uuid),
    DeleteSession(Uuid),
    CardTap(usize),
    ConfirmHighScoreName(String),
    CancelHighScoreName,
    ClearHighScores,
    Shutdown,
}

/// What a fired post-evaluation delay should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingStep {
    /// Correct answer banked; start the next level's round.
    NextLevel,
    /// Wrong-answer feedback has been on screen long enough.
    FeedbackShown,
    /// Retry pause after a non-fatal wrong answer elapsed.
    RetryLevel,
}

/// Events emitted by reveal, countdown, and delay tasks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum EngineEvent {
    RevealStep { epoch: u64, card: usize, number: u32 },
    RevealHide { epoch: u64, card: usize },
    RevealDone { epoch: u64 },
    CountdownTick { epoch: u64, remaining: f64 },
    CountdownExpired { epoch: u64 },
    DelayElapsed { epoch: u64, step: PendingStep },
}

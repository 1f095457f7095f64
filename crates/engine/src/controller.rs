//! Game controller - the session state machine
//!
//! The controller owns the single live [`GameSession`], the card grid, the
//! leaderboard, and the saved-session list, and is the only place any of
//! them is mutated. It runs as one event loop over two channels: commands
//! from presentation and events from its own timed tasks. The phase machine
//! guarantees the reveal and the countdown are never active at the same
//! time, and every task event carries the epoch of the round that spawned
//! it so stragglers from a cancelled task are discarded on receipt.
//!
//! Phases: `Waiting -> ShowingPattern -> PlayerTurn -> Evaluating`, then
//! back to `ShowingPattern` (next level, or same level after a non-fatal
//! wrong answer) or on to `Failed` once lives or time run out.

use log::debug;
use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use pattern_pulse_core::{
    pattern, scoring, CardGrid, GameSession, HighScoreBoard, HighScoreEntry, SimpleRng,
    TapOutcome,
};
use pattern_pulse_store::{BlobStore, GameStore};
use pattern_pulse_types::{Difficulty, GamePhase, FEEDBACK_PAUSE_SECS, GRID_SIZE};

use crate::event::{EngineCommand, EngineEvent, PendingStep};
use crate::snapshot::EngineSnapshot;
use crate::task::TaskSlot;
use crate::timing;

/// Engine tuning knobs.
///
/// # Environment Variables
///
/// - `PATTERN_PULSE_SEED`: fixes the RNG seed for reproducible games
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub seed: Option<u32>,
}

impl EngineConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        let seed = std::env::var("PATTERN_PULSE_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok());
        Self { seed }
    }

    pub fn with_seed(seed: u32) -> Self {
        Self { seed: Some(seed) }
    }

    fn resolve_seed(&self) -> u32 {
        use std::time::{SystemTime, UNIX_EPOCH};
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

/// The orchestrator and state machine.
pub struct GameController<S: BlobStore> {
    session: Option<GameSession>,
    cards: CardGrid,
    board: HighScoreBoard,
    saved_sessions: Vec<GameSession>,
    pending_entry: Option<HighScoreEntry>,
    last_difficulty: Difficulty,
    rng: SimpleRng,
    store: GameStore<S>,
    /// Monotonic round id; task events from earlier epochs are stale.
    epoch: u64,
    reveal: TaskSlot,
    countdown: TaskSlot,
    delay: TaskSlot,
    events_tx: mpsc::UnboundedSender<EngineEvent>,
    snapshot_tx: watch::Sender<EngineSnapshot>,
}

impl<S: BlobStore> GameController<S> {
    pub(crate) fn new(
        store: GameStore<S>,
        config: &EngineConfig,
        events_tx: mpsc::UnboundedSender<EngineEvent>,
        snapshot_tx: watch::Sender<EngineSnapshot>,
    ) -> Self {
        let board = HighScoreBoard::new(store.load_high_scores());
        let saved_sessions = store.load_sessions();
        debug!(
            "loaded {} saved sessions, {} high scores",
            saved_sessions.len(),
            board.len()
        );

        let mut rng = SimpleRng::new(config.resolve_seed());
        let cards = CardGrid::deal(&mut rng);

        Self {
            session: None,
            cards,
            board,
            saved_sessions,
            pending_entry: None,
            last_difficulty: Difficulty::Medium,
            rng,
            store,
            epoch: 0,
            reveal: TaskSlot::default(),
            countdown: TaskSlot::default(),
            delay: TaskSlot::default(),
            events_tx,
            snapshot_tx,
        }
    }

    /// Event loop: runs until a shutdown command arrives or every command
    /// sender is dropped.
    pub(crate) async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<EngineCommand>,
        mut events: mpsc::UnboundedReceiver<EngineEvent>,
    ) {
        self.publish();
        loop {
            tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(EngineCommand::Shutdown) | None => {
                        self.cancel_tasks();
                        break;
                    }
                    Some(cmd) => {
                        self.handle_command(cmd);
                        self.publish();
                    }
                },
                Some(ev) = events.recv() => {
                    self.handle_event(ev);
                    self.publish();
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::StartNewGame(difficulty) => self.start_new_game(difficulty),
            EngineCommand::ResumeGame(id) => self.resume_game(id),
            EngineCommand::DeleteSession(id) => self.delete_session(id),
            EngineCommand::CardTap(index) => self.on_card_tap(index),
            EngineCommand::ConfirmHighScoreName(name) => self.confirm_high_score(&name),
            EngineCommand::CancelHighScoreName => self.cancel_high_score(),
            EngineCommand::ClearHighScores => self.clear_high_scores(),
            EngineCommand::Shutdown => {}
        }
    }

    fn handle_event(&mut self, ev: EngineEvent) {
        match ev {
            EngineEvent::RevealStep { epoch, card, number } => {
                if self.event_live(epoch, GamePhase::ShowingPattern) {
                    self.cards.show(card, number);
                }
            }
            EngineEvent::RevealHide { epoch, card } => {
                if self.event_live(epoch, GamePhase::ShowingPattern) {
                    self.cards.hide(card);
                }
            }
            EngineEvent::RevealDone { epoch } => {
                if self.event_live(epoch, GamePhase::ShowingPattern) {
                    self.begin_player_turn();
                }
            }
            EngineEvent::CountdownTick { epoch, remaining } => {
                if self.event_live(epoch, GamePhase::PlayerTurn) {
                    if let Some(session) = self.session.as_mut() {
                        session.time_remaining = remaining;
                    }
                }
            }
            EngineEvent::CountdownExpired { epoch } => {
                if self.event_live(epoch, GamePhase::PlayerTurn) {
                    self.handle_timeout();
                }
            }
            EngineEvent::DelayElapsed { epoch, step } => {
                if epoch == self.epoch {
                    self.handle_step(step);
                }
            }
        }
    }

    /// A task event is live only if it carries the current epoch and the
    /// session is in the phase that task owns.
    fn event_live(&self, epoch: u64, phase: GamePhase) -> bool {
        epoch == self.epoch && self.phase() == phase
    }

    fn phase(&self) -> GamePhase {
        self.session
            .as_ref()
            .map(|s| s.phase)
            .unwrap_or(GamePhase::Waiting)
    }

    // ---- presentation commands ----

    fn start_new_game(&mut self, difficulty: Difficulty) {
        // A score still waiting on the name prompt is banked under the
        // default name rather than dropped.
        self.cancel_high_score();

        // Starting over from a dead session removes its saved entry.
        if let Some(session) = self.session.as_ref() {
            if !session.is_alive() {
                self.remove_saved(session.id);
            }
        }

        self.cancel_tasks();
        self.last_difficulty = difficulty;
        let session = GameSession::new(difficulty);
        debug!(
            "new game: difficulty={}, level={}, lives={}",
            difficulty.as_str(),
            session.current_level,
            session.lives
        );
        self.cards = CardGrid::deal(&mut self.rng);
        self.session = Some(session);
        self.begin_round();
    }

    fn resume_game(&mut self, id: Uuid) {
        let Some(saved) = self.saved_sessions.iter().find(|s| s.id == id).cloned() else {
            debug!("resume ignored: unknown session {id}");
            return;
        };

        self.cancel_high_score();
        self.cancel_tasks();
        self.last_difficulty = saved.difficulty;
        debug!(
            "resuming session: level={}, score={}",
            saved.current_level, saved.score
        );

        self.cards = CardGrid::deal(&mut self.rng);
        let mut session = saved;
        // The in-flight pattern is not replayed; a fresh one is generated
        // at the restored level.
        session.current_pattern = None;
        session.player_input.clear();
        session.phase = GamePhase::Waiting;
        self.session = Some(session);
        self.begin_round();
    }

    fn delete_session(&mut self, id: Uuid) {
        self.remove_saved(id);
        if self.session.as_ref().map(|s| s.id) == Some(id) {
            self.cancel_tasks();
            self.session = None;
            self.cards.reset();
        }
    }

    fn on_card_tap(&mut self, index: usize) {
        if index >= GRID_SIZE {
            return;
        }
        let outcome = match self.session.as_mut() {
            Some(session) => session.record_tap(index),
            None => return,
        };
        match outcome {
            TapOutcome::Ignored => {}
            TapOutcome::Accepted => self.cards.flip_up(index),
            TapOutcome::Complete => {
                self.cards.flip_up(index);
                self.evaluate();
            }
        }
    }

    fn confirm_high_score(&mut self, name: &str) {
        let Some(draft) = self.pending_entry.take() else {
            return;
        };
        let entry = draft.with_name(name);
        debug!("high score saved: {} - {}", entry.player_name, entry.score);
        self.board.submit(entry);
        self.store.save_high_scores(self.board.entries());
    }

    fn cancel_high_score(&mut self) {
        // Declining the prompt still records the run, under the default name.
        let Some(draft) = self.pending_entry.take() else {
            return;
        };
        debug!("high score saved with default name: {}", draft.score);
        self.board.submit(draft);
        self.store.save_high_scores(self.board.entries());
    }

    fn clear_high_scores(&mut self) {
        self.board.clear();
        self.store.save_high_scores(self.board.entries());
    }

    // ---- state machine steps ----

    /// Enter `Waiting`, generate a pattern for the session's current level,
    /// and kick off the reveal.
    fn begin_round(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.phase = GamePhase::Waiting;

        let generated = pattern::generate(session.current_level, session.difficulty, &mut self.rng);
        session.set_pattern(generated.clone());
        session.phase = GamePhase::ShowingPattern;

        self.cards.reset();
        self.epoch += 1;
        self.reveal
            .replace(timing::spawn_reveal(generated, self.epoch, self.events_tx.clone()));
    }

    fn begin_player_turn(&mut self) {
        let time_limit = match self.session.as_mut() {
            Some(session) => {
                let Some(limit) = session.current_pattern.as_ref().map(|p| p.time_limit) else {
                    return;
                };
                session.phase = GamePhase::PlayerTurn;
                session.player_input.clear();
                session.time_remaining = limit;
                limit
            }
            None => return,
        };
        self.countdown
            .replace(timing::spawn_countdown(time_limit, self.epoch, self.events_tx.clone()));
    }

    fn evaluate(&mut self) {
        // The countdown must not outlive the player turn.
        self.countdown.cancel();

        let correct = match self.session.as_mut() {
            Some(session) => {
                session.phase = GamePhase::Evaluating;
                let correct = session.input_matches_pattern();
                if correct {
                    scoring::apply_correct(session);
                    debug!(
                        "correct: score={}, next level={}",
                        session.score, session.current_level
                    );
                } else {
                    scoring::apply_wrong(session);
                    debug!("wrong: lives left={}", session.lives);
                }
                correct
            }
            None => return,
        };

        if correct {
            self.save_current_session();
            self.schedule_step(PendingStep::NextLevel);
        } else {
            // Re-display the full correct pattern as feedback.
            let sequence = self
                .session
                .as_ref()
                .and_then(|s| s.current_pattern.as_ref())
                .map(|p| p.sequence.clone())
                .unwrap_or_default();
            for card in sequence {
                self.cards.flip_up(card);
            }
            self.schedule_step(PendingStep::FeedbackShown);
        }
    }

    fn handle_step(&mut self, step: PendingStep) {
        match step {
            PendingStep::NextLevel => self.begin_round(),
            PendingStep::FeedbackShown => {
                self.cards.reset();
                let alive = self.session.as_ref().map(|s| s.is_alive()).unwrap_or(false);
                if alive {
                    self.save_current_session();
                    self.schedule_step(PendingStep::RetryLevel);
                } else {
                    self.enter_failed();
                }
            }
            PendingStep::RetryLevel => self.begin_round(),
        }
    }

    fn handle_timeout(&mut self) {
        self.countdown.cancel();
        if let Some(session) = self.session.as_mut() {
            scoring::apply_timeout(session);
            debug!("time expired at level {}", session.current_level);
        }
        self.enter_failed();
    }

    fn enter_failed(&mut self) {
        self.cancel_tasks();
        if let Some(session) = self.session.as_mut() {
            session.phase = GamePhase::Failed;
        }
        let Some(session) = self.session.as_ref() else {
            return;
        };
        // The dead session stays in the store for the game-over screen; it
        // is removed when the player starts over or deletes it.
        if session.score > 0 {
            self.pending_entry = Some(HighScoreEntry::draft(
                session.score,
                session.difficulty,
                session.current_level,
            ));
        }
    }

    // ---- helpers ----

    fn schedule_step(&mut self, step: PendingStep) {
        self.delay.replace(timing::spawn_delay(
            FEEDBACK_PAUSE_SECS,
            self.epoch,
            step,
            self.events_tx.clone(),
        ));
    }

    fn cancel_tasks(&mut self) {
        self.reveal.cancel();
        self.countdown.cancel();
        self.delay.cancel();
        self.epoch += 1;
    }

    /// Upsert the live session into the saved list. Dead sessions are
    /// never written back as resumable.
    fn save_current_session(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if !session.is_alive() {
            return;
        }
        let session = session.clone();
        self.saved_sessions.retain(|s| s.id != session.id);
        self.saved_sessions.push(session);
        self.store.save_sessions(&self.saved_sessions);
    }

    fn remove_saved(&mut self, id: Uuid) {
        let before = self.saved_sessions.len();
        self.saved_sessions.retain(|s| s.id != id);
        if self.saved_sessions.len() != before {
            self.store.save_sessions(&self.saved_sessions);
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }

    fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            session: self.session.clone(),
            phase: self.phase(),
            cards: self.cards.iter().copied().collect(),
            high_scores: self.board.entries().to_vec(),
            saved_sessions: self.saved_sessions.clone(),
            pending_entry: self.pending_entry.clone(),
            last_difficulty: self.last_difficulty,
        }
    }
}

//! Engine module - async orchestration of the game session
//!
//! This crate hosts the state machine that drives a play-through: it asks
//! the core for patterns, schedules their timed reveal, guards the player
//! turn with a countdown, evaluates input, applies scoring, persists
//! progress, and maintains the leaderboard.
//!
//! # Architecture
//!
//! One controller task owns all mutable state and runs an event loop over
//! two channels:
//!
//! - **Commands** ([`EngineCommand`]) arrive from presentation: start,
//!   resume, delete, taps, name-prompt answers.
//! - **Events** arrive from the controller's own timed tasks: reveal
//!   steps, countdown ticks, post-evaluation delays.
//!
//! After every transition the controller publishes an immutable
//! [`EngineSnapshot`] over a watch channel; renderers never touch live
//! state. Timed tasks are held in per-role slots with idempotent
//! cancellation, and every event is epoch-tagged so anything emitted by a
//! superseded task is discarded.
//!
//! # Usage
//!
//! From async code, [`spawn`] the engine on the current runtime. From a
//! synchronous front end (the terminal loop), use [`Engine::start`], which
//! brings up its own runtime and bridges it to the blocking world through
//! the cloneable [`EngineHandle`].

use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};

use pattern_pulse_store::{BlobStore, GameStore};

mod controller;
mod event;
mod snapshot;
mod task;
mod timing;

pub use controller::EngineConfig;
pub use event::EngineCommand;
pub use snapshot::EngineSnapshot;
pub use task::{TaskHandle, TaskSlot};

use controller::GameController;

/// Cloneable handle for talking to a running engine.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::UnboundedSender<EngineCommand>,
    snapshot_rx: watch::Receiver<EngineSnapshot>,
}

impl EngineHandle {
    /// Send a command. Sends to a stopped engine are silently dropped.
    pub fn send(&self, cmd: EngineCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    /// Copy of the most recently published snapshot.
    pub fn snapshot(&self) -> EngineSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Latest snapshot, marking it as seen.
    pub fn latest(&mut self) -> EngineSnapshot {
        self.snapshot_rx.borrow_and_update().clone()
    }

    /// Wait for the next published snapshot. Returns false once the
    /// engine has stopped.
    pub async fn changed(&mut self) -> bool {
        self.snapshot_rx.changed().await.is_ok()
    }
}

/// Spawn the engine on the current tokio runtime.
pub fn spawn<S>(store: GameStore<S>, config: EngineConfig) -> EngineHandle
where
    S: BlobStore + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(EngineSnapshot::default());

    let controller = GameController::new(store, &config, events_tx, snapshot_tx);
    tokio::spawn(controller.run(cmd_rx, events_rx));

    EngineHandle { cmd_tx, snapshot_rx }
}

/// Running engine instance with its own runtime, for synchronous callers.
pub struct Engine {
    _rt: Runtime,
    handle: EngineHandle,
}

impl Engine {
    /// Start the engine on a dedicated runtime.
    pub fn start<S>(store: GameStore<S>, config: EngineConfig) -> Self
    where
        S: BlobStore + Send + 'static,
    {
        let rt = Runtime::new().expect("Failed to create tokio runtime");
        let handle = {
            let _guard = rt.enter();
            spawn(store, config)
        };
        Self { _rt: rt, handle }
    }

    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }
}

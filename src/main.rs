//! Terminal runner (default binary).
//!
//! Drives a blocking crossterm input loop against the async engine: the
//! engine runs on its own runtime, commands go in over the handle, and
//! every frame redraws the latest published snapshot.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use pattern_pulse::engine::{Engine, EngineCommand, EngineConfig, EngineHandle};
use pattern_pulse::store::{FileStore, GameStore};
use pattern_pulse::term::{render, InputMapper, Screen, UiAction};

const POLL_INTERVAL_MS: u64 = 50;

fn main() -> Result<()> {
    env_logger::init();

    let store = GameStore::new(FileStore::from_env());
    let engine = Engine::start(store, EngineConfig::from_env());

    let mut screen = Screen::new();
    screen.enter()?;

    let result = run(engine.handle(), &mut screen);

    // Always try to restore terminal state.
    let _ = screen.exit();
    result
}

fn run(handle: EngineHandle, screen: &mut Screen) -> Result<()> {
    let mut mapper = InputMapper::new();

    loop {
        let snapshot = handle.snapshot();
        screen.draw(&render(&snapshot, mapper.name_buffer()))?;

        if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match mapper.handle_key(key, &snapshot) {
                    Some(UiAction::Quit) => {
                        handle.send(EngineCommand::Shutdown);
                        return Ok(());
                    }
                    Some(UiAction::Engine(cmd)) => handle.send(cmd),
                    None => {}
                }
            }
        }
    }
}

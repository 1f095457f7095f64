//! Terminal front end for the memory game.
//!
//! Three small pieces, mirroring the engine's one-way data flow:
//!
//! - [`view`]: pure snapshot-to-lines rendering (unit-testable, no I/O)
//! - [`screen`]: raw-mode terminal output via crossterm
//! - [`input`]: key-to-command mapping, including the name prompt
//!
//! The front end only sends [`EngineCommand`]s and draws snapshots; it
//! never reaches into engine state.
//!
//! [`EngineCommand`]: pattern_pulse_engine::EngineCommand

pub mod input;
pub mod screen;
pub mod view;

pub use input::{InputMapper, UiAction};
pub use screen::Screen;
pub use view::render;

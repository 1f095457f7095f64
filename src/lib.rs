//! Pattern Pulse (workspace facade crate).
//!
//! This package keeps a single `pattern_pulse::{types,core,store,engine,term}`
//! public API while the implementation lives in dedicated crates under
//! `crates/`.

pub use pattern_pulse_core as core;
pub use pattern_pulse_engine as engine;
pub use pattern_pulse_store as store;
pub use pattern_pulse_term as term;
pub use pattern_pulse_types as types;

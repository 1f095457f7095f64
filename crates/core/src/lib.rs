//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the sequence-memory game with **zero
//! dependencies** on UI, async runtime, or I/O, making it:
//!
//! - **Deterministic**: the same seed deals the same cards and patterns
//! - **Testable**: every rule has unit tests next to it
//! - **Portable**: usable from the terminal front end or headless tests
//!
//! # Module Structure
//!
//! - [`rng`]: seeded LCG used for pattern and image sampling
//! - [`pattern`]: per-round challenge generation (length, speed, time limit)
//! - [`cards`]: the 3x3 card grid and its face/label state
//! - [`session`]: the play-through record and tap accumulation
//! - [`scoring`]: score, level advance, and life deduction rules
//! - [`leaderboard`]: bounded, score-sorted high-score list
//!
//! # Game Rules
//!
//! - A pattern's length is the difficulty base (2/3/4) plus one per three
//!   levels, unbounded.
//! - Reveal speed and the response window shrink with the level down to
//!   fixed floors (0.3s per card, 10s per turn).
//! - Input is judged only at full length; a wrong submission costs exactly
//!   one life, and a timeout ends the session immediately.
//! - The leaderboard keeps the top ten positive scores, sorted descending.

pub mod cards;
pub mod leaderboard;
pub mod pattern;
pub mod rng;
pub mod scoring;
pub mod session;

pub use cards::{CardGrid, GridCard};
pub use leaderboard::{HighScoreBoard, HighScoreEntry};
pub use pattern::Pattern;
pub use rng::SimpleRng;
pub use session::{GameSession, TapOutcome};

//! Persistence module - key-value blob storage for sessions and scores
//!
//! Game state is persisted as opaque JSON blobs under string keys, so the
//! engine never depends on a storage format. Two backends are provided:
//!
//! - [`FileStore`]: one JSON file per key under a data directory
//! - [`MemStore`]: in-memory map, used by tests
//!
//! Loading is deliberately forgiving: a missing key or a blob that fails to
//! decode yields an empty collection, never an error. A half-written or
//! corrupted file must not brick the game; the player just loses that list.
//!
//! # Environment Variables
//!
//! - `PATTERN_PULSE_DATA_DIR`: overrides the blob directory (default: the
//!   platform data dir, e.g. `~/.local/share/pattern-pulse`)

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use pattern_pulse_core::{GameSession, HighScoreEntry};

/// Blob key for the persisted leaderboard.
pub const HIGH_SCORES_KEY: &str = "high_scores";

/// Blob key for the persisted session list.
pub const SESSIONS_KEY: &str = "sessions";

/// Errors a blob backend can produce. These stay internal to the store;
/// the typed load/save API downgrades them to empty lists and log lines.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("blob io failed: {0}")]
    Io(#[from] io::Error),
    #[error("blob encode/decode failed: {0}")]
    Codec(#[from] serde_json::Error),
}

/// A key-value store of opaque byte blobs.
pub trait BlobStore {
    /// Fetch a blob. `Ok(None)` means the key has never been written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// File-backed blob store: `<dir>/<key>.json` per key.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Build from environment variables, falling back to the platform
    /// data directory.
    pub fn from_env() -> Self {
        let dir = std::env::var("PATTERN_PULSE_DATA_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        Self::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

/// Platform data directory for the game.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pattern-pulse")
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), bytes)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory blob store for tests.
#[derive(Debug, Default)]
pub struct MemStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.blobs.remove(key);
        Ok(())
    }
}

/// Typed persistence facade over a blob backend.
///
/// Decode failures and missing keys load as empty lists; save failures are
/// logged and swallowed so gameplay is never interrupted by storage.
#[derive(Debug)]
pub struct GameStore<S: BlobStore> {
    blobs: S,
}

impl<S: BlobStore> GameStore<S> {
    pub fn new(blobs: S) -> Self {
        Self { blobs }
    }

    pub fn load_high_scores(&self) -> Vec<HighScoreEntry> {
        self.load_list(HIGH_SCORES_KEY)
    }

    pub fn save_high_scores(&mut self, scores: &[HighScoreEntry]) {
        self.save_list(HIGH_SCORES_KEY, scores);
    }

    pub fn load_sessions(&self) -> Vec<GameSession> {
        self.load_list(SESSIONS_KEY)
    }

    pub fn save_sessions(&mut self, sessions: &[GameSession]) {
        self.save_list(SESSIONS_KEY, sessions);
    }

    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let bytes = match self.blobs.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("no {key} blob yet, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!("failed to read {key} blob: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(list) => list,
            Err(e) => {
                warn!("discarding undecodable {key} blob: {e}");
                Vec::new()
            }
        }
    }

    fn save_list<T: Serialize>(&mut self, key: &str, list: &[T]) {
        let bytes = match serde_json::to_vec(list) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("failed to encode {key}: {e}");
                return;
            }
        };
        if let Err(e) = self.blobs.put(key, &bytes) {
            warn!("failed to write {key} blob: {e}");
        }
    }
}

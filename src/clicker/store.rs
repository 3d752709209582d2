//! Single-writer game state store over a key-value persistence backend.
//!
//! The store owns the live [`GameState`]. Every mutation goes through
//! [`GameStore::apply`], which hands the closure the current value, so a
//! transition can never act on a stale snapshot.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::save;
use super::state::GameState;

/// Key the persistence record is stored under.
pub const STORAGE_KEY: &str = "idle-game-state";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend is unavailable")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("failed to encode save record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Minimal get/set persistence medium (localStorage in the browser).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend for tests and hosts without storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

pub struct GameStore<S: KeyValueStore> {
    backend: S,
    state: GameState,
}

impl<S: KeyValueStore> GameStore<S> {
    /// Load the persisted record, or seed a fresh game when it is absent or
    /// malformed. Malformed records are removed from the backend.
    pub fn open(mut backend: S, now_ms: u64, growth: f64) -> Self {
        let state = match backend.get(STORAGE_KEY) {
            Ok(Some(json)) => match save::decode(&json, growth) {
                Ok(mut state) => {
                    if state.last_sync_time == 0 || state.last_sync_time > now_ms {
                        debug!(
                            saved = state.last_sync_time,
                            now = now_ms,
                            "save has no usable sync time; syncing to now"
                        );
                        state.last_sync_time = now_ms;
                    }
                    info!(resource = state.resource, "loaded saved game");
                    state
                }
                Err(e) => {
                    warn!(error = %e, "discarding corrupt save");
                    if let Err(e) = backend.remove(STORAGE_KEY) {
                        warn!(error = %e, "failed to remove corrupt save");
                    }
                    GameState::new(now_ms)
                }
            },
            Ok(None) => {
                info!("no saved game; starting fresh");
                GameState::new(now_ms)
            }
            Err(e) => {
                warn!(error = %e, "failed to read save; starting fresh");
                GameState::new(now_ms)
            }
        };
        Self { backend, state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run `f` on the live state and return its result.
    pub fn apply<R>(&mut self, f: impl FnOnce(&mut GameState) -> R) -> R {
        f(&mut self.state)
    }

    /// Swap in a whole new value.
    pub fn replace(&mut self, state: GameState) {
        self.state = state;
    }

    /// Write the whole value to the backend.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        let json = save::encode(&self.state)?;
        self.backend.set(STORAGE_KEY, &json)
    }

    /// Replace the value with a fresh seed and persist it.
    pub fn reset(&mut self, now_ms: u64) {
        self.state = GameState::new(now_ms);
        if let Err(e) = self.persist() {
            warn!(error = %e, "failed to persist reset");
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }
}

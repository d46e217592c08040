//! High-score storage
//!
//! The simulation never touches storage directly; a [`ScoreStore`] holds the
//! ordered list and the session loads/saves through it.
//!
//! Backends:
//! - [`MemoryStore`]: tests and headless runs
//! - [`JsonFileStore`]: native, pretty-printed JSON file
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use crate::error::StoreError;
use crate::highscores::HighScoreEntry;

/// Key-value store holding the high-score list
pub trait ScoreStore {
    fn load(&self) -> Result<Vec<HighScoreEntry>, StoreError>;
    fn save(&mut self, entries: &[HighScoreEntry]) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<HighScoreEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<HighScoreEntry>) -> Self {
        Self { entries }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Vec<HighScoreEntry>, StoreError> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[HighScoreEntry]) -> Result<(), StoreError> {
        self.entries = entries.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u64) -> HighScoreEntry {
        HighScoreEntry {
            name: name.to_string(),
            score,
        }
    }

    #[test]
    fn test_memory_save_load_round_trip() {
        let mut store = MemoryStore::with_entries(vec![entry("ann", 900), entry("bo", 400)]);
        let before = store.load().unwrap();
        store.save(&before).unwrap();
        assert_eq!(store.load().unwrap(), before);
    }
}

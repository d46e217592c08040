use std::path::{Path, PathBuf};

use super::ScoreStore;
use crate::error::StoreError;
use crate::highscores::HighScoreEntry;

/// High scores in a JSON file. A missing file reads as an empty list.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<Vec<HighScoreEntry>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&mut self, entries: &[HighScoreEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)?;
        // Write then rename so a crash never leaves a half-written list
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

use super::ScoreStore;
use crate::error::StoreError;
use crate::highscores::HighScoreEntry;

/// High scores in browser LocalStorage
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::STORAGE_KEY)
    }
}

impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "brick_breaker_highscores";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage".to_string()))
    }
}

impl ScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Vec<HighScoreEntry>, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(json)) => Ok(serde_json::from_str(&json)?),
            Ok(None) => Ok(Vec::new()),
            Err(e) => Err(StoreError::Unavailable(format!("{:?}", e))),
        }
    }

    fn save(&mut self, entries: &[HighScoreEntry]) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(entries)?;
        storage
            .set_item(&self.key, &json)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}

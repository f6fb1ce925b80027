//! Persisted deck so a restart resumes without fetching again

use crate::domain::Card;
use crate::error::{CatswpError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key the deck is stored under
pub const DECK_KEY: &str = "cats";

/// Opaque key-value blob store
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, blob: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    dir: PathBuf,
}

impl FileCacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default cache directory (~/.cache/catswp on Linux)
    pub fn default_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("catswp"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl CacheStore for FileCacheStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| CatswpError::CacheError(format!("Failed to read {:?}: {}", path, e)))
    }

    fn set(&self, key: &str, blob: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            CatswpError::CacheError(format!("Failed to create cache directory: {}", e))
        })?;

        let path = self.path_for(key);
        fs::write(&path, blob)
            .map_err(|e| CatswpError::CacheError(format!("Failed to write {:?}: {}", path, e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }

        fs::remove_file(&path)
            .map_err(|e| CatswpError::CacheError(format!("Failed to remove {:?}: {}", path, e)))
    }
}

/// In-process store, used by tests and embedders without a filesystem
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| CatswpError::CacheError("Cache lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, blob: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CatswpError::CacheError("Cache lock poisoned".to_string()))?;
        entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CatswpError::CacheError("Cache lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Typed view of the deck blob
pub struct DeckCache {
    store: Box<dyn CacheStore>,
    key: String,
}

impl DeckCache {
    pub fn new(store: Box<dyn CacheStore>) -> Self {
        Self {
            store,
            key: DECK_KEY.to_string(),
        }
    }

    /// Loads the cached deck. Unreadable or corrupt blobs count as a miss.
    pub fn load(&self) -> Option<Vec<Card>> {
        let blob = match self.store.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable deck cache: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Vec<Card>>(&blob) {
            Ok(cards) => {
                tracing::info!(cards = cards.len(), "Restored deck from cache");
                Some(cards)
            }
            Err(e) => {
                tracing::warn!("Ignoring corrupt deck cache: {}", e);
                None
            }
        }
    }

    pub fn save(&self, cards: &[Card]) -> Result<()> {
        let blob = serde_json::to_string(cards)
            .map_err(|e| CatswpError::CacheError(format!("Failed to serialize deck: {}", e)))?;
        self.store.set(&self.key, &blob)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }
}

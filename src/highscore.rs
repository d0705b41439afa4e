//! High score persistence
//!
//! A single integer under a fixed key. Native builds keep it in a small JSON
//! file, the web build in LocalStorage. Absent or unreadable data reads as 0.

use crate::error::Result;

/// Storage key for the high score (shared with earlier web releases)
pub const STORAGE_KEY: &str = "crossRoadHighScore";

/// Durable home for the high score
pub trait HighScoreStore {
    /// Stored high score, 0 if nothing usable is stored
    fn load(&self) -> u64;

    /// Overwrite the stored high score
    fn save(&mut self, score: u64) -> Result<()>;
}

/// In-process store (tests, embedding, or when no durable storage exists)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self {
            value: Some(score),
            saves: 0,
        }
    }

    /// Number of successful writes
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, score: u64) -> Result<()> {
        self.value = Some(score);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::path::{Path, PathBuf};

    use serde_json::{Map, Value};

    use super::{HighScoreStore, STORAGE_KEY};
    use crate::error::Result;

    /// JSON file holding `{ "crossRoadHighScore": <n> }`.
    ///
    /// Other keys in the file are preserved on save.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_map(&self) -> Result<Option<Map<String, Value>>> {
            match std::fs::read_to_string(&self.path) {
                Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(err) => Err(err.into()),
            }
        }
    }

    impl HighScoreStore for FileStore {
        fn load(&self) -> u64 {
            match self.read_map() {
                Ok(Some(map)) => match map.get(STORAGE_KEY).and_then(Value::as_u64) {
                    Some(score) => {
                        log::info!("Loaded high score {} from {}", score, self.path.display());
                        score
                    }
                    None => {
                        log::warn!("No usable high score in {}", self.path.display());
                        0
                    }
                },
                Ok(None) => {
                    log::info!("No high score found, starting fresh");
                    0
                }
                Err(err) => {
                    log::warn!("Ignoring unreadable high score file {}: {}", self.path.display(), err);
                    0
                }
            }
        }

        fn save(&mut self, score: u64) -> Result<()> {
            // A corrupt file is replaced rather than blocking the save
            let mut map = self.read_map().ok().flatten().unwrap_or_default();
            map.insert(STORAGE_KEY.to_string(), Value::from(score));
            let json = serde_json::to_string_pretty(&map)?;

            let tmp = self.path.with_extension("tmp");
            std::fs::write(&tmp, json)?;
            if let Err(err) = std::fs::rename(&tmp, &self.path) {
                let _ = std::fs::remove_file(&tmp);
                return Err(err.into());
            }

            log::info!("High score {} saved to {}", score, self.path.display());
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{HighScoreStore, STORAGE_KEY};
    use crate::error::{Error, Result};

    /// Browser LocalStorage entry
    #[derive(Debug, Clone, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl HighScoreStore for LocalStorageStore {
        fn load(&self) -> u64 {
            if let Some(storage) = Self::storage() {
                if let Ok(Some(value)) = storage.get_item(STORAGE_KEY) {
                    if let Ok(score) = value.trim().parse::<u64>() {
                        log::info!("Loaded high score {}", score);
                        return score;
                    }
                }
            }

            log::info!("No high score found, starting fresh");
            0
        }

        fn save(&mut self, score: u64) -> Result<()> {
            let storage = Self::storage()
                .ok_or_else(|| Error::StorageUnavailable("LocalStorage not available".into()))?;
            storage
                .set_item(STORAGE_KEY, &score.to_string())
                .map_err(|err| Error::StorageUnavailable(format!("{:?}", err)))?;
            log::info!("High score {} saved", score);
            Ok(())
        }
    }
}

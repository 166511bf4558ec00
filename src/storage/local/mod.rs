//! Local storage: a synchronous key-value mirror of whole collections.
//!
//! Each collection is one JSON array stored under a fixed key. There is no
//! transaction primitive; multi-collection writes are plain sequential sets.

mod collections;
mod seed;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{Result, StorageError};

pub use collections::{
    local_id, LocalCollections, CUSTOMERS_KEY, LEDGER_KEY, MODE_FLAG_KEY, ORDERS_KEY, QUOTES_KEY,
};
pub use seed::seed_demo_data;

/// Whole-value key-value storage.
///
/// Implementations:
/// - `FileLocalStorage`: one file per key in a directory
/// - `MemoryLocalStorage`: in-memory map for testing
pub trait LocalStorage: Send + Sync {
    /// Read the value under `key`, `None` if never set.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Directory-backed local storage. Key `k` lives in `<dir>/k.json`.
pub struct FileLocalStorage {
    dir: PathBuf,
}

impl FileLocalStorage {
    /// Open (creating if needed) a storage directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl LocalStorage for FileLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        // Write-then-rename so a crash never leaves a half-written collection.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory local storage for testing.
#[derive(Default)]
pub struct MemoryLocalStorage {
    items: Mutex<HashMap<String, String>>,
    failing_key: Mutex<Option<String>>,
}

impl MemoryLocalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `set_item` on `key` fail until cleared with `None`.
    pub fn fail_writes_to(&self, key: Option<&str>) {
        if let Ok(mut failing) = self.failing_key.lock() {
            *failing = key.map(str::to_string);
        }
    }

    fn items(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| StorageError::Unavailable("local storage lock poisoned".to_string()))
    }
}

impl LocalStorage for MemoryLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let failing = self
            .failing_key
            .lock()
            .map(|k| k.as_deref() == Some(key))
            .unwrap_or(false);
        if failing {
            return Err(StorageError::Unavailable(format!(
                "local write to {} refused",
                key
            )));
        }
        self.items()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items()?.remove(key);
        Ok(())
    }
}

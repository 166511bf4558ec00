//! Backend factory for interface tests.
//!
//! Builds a shop repository routed to the store named by the environment.

use std::env;
use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;

use rochedo::config::StorageMode;
use rochedo::repository::ShopRepository;
use rochedo::storage::local::{FileLocalStorage, LocalCollections, MemoryLocalStorage};
use rochedo::storage::SqliteStore;

/// Storage mode under test, from `STORAGE_MODE` (primary by default).
pub fn mode_from_env() -> StorageMode {
    env::var("STORAGE_MODE")
        .ok()
        .and_then(|m| m.parse().ok())
        .unwrap_or(StorageMode::Primary)
}

/// Holds the repository plus whatever must stay alive alongside it.
pub struct StorageContext {
    pub repository: Arc<ShopRepository>,
    /// Directory backing the local mirror, removed on drop.
    local_dir: tempfile::TempDir,
}

impl std::fmt::Debug for StorageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageContext")
            .field("mode", &self.repository.mode())
            .field("local_dir", &self.local_dir.path())
            .finish()
    }
}

impl StorageContext {
    /// Create a fresh, empty repository for `mode`.
    ///
    /// The primary store is always an in-memory SQLite database. The local
    /// mirror is file-backed in local mode and in-memory otherwise.
    pub async fn new(mode: StorageMode) -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create SQLite pool");
        let primary = SqliteStore::new(pool);
        primary.init().await.expect("Failed to create tables");

        let local_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let local = match mode {
            StorageMode::Local => LocalCollections::new(Arc::new(
                FileLocalStorage::open(local_dir.path()).expect("Failed to open local storage"),
            )),
            StorageMode::Primary => LocalCollections::new(Arc::new(MemoryLocalStorage::new())),
        };

        StorageContext {
            repository: Arc::new(ShopRepository::new(Arc::new(primary), local, mode)),
            local_dir,
        }
    }
}

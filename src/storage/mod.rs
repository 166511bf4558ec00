//! Storage implementations.
//!
//! The primary store is a set of async collection traits plus one atomic
//! approval primitive. The local store is a synchronous whole-collection
//! key-value mirror with no transactions.

use std::sync::Arc;

use tracing::info;

use crate::config::StorageConfig;
use crate::model::ValidationError;

mod approval_store;
mod customer_store;
mod ledger_store;
mod order_store;
mod quote_store;

pub mod local;
pub mod mock;
#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use approval_store::ApprovalStore;
pub use customer_store::CustomerStore;
pub use ledger_store::LedgerStore;
pub use order_store::OrderStore;
pub use quote_store::QuoteStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors raised by primary or local storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Record not found: {collection}/{id}")]
    NotFound { collection: Collection, id: String },

    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationError),

    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt {collection} record: {reason}")]
    Corrupt {
        collection: Collection,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn not_found(collection: Collection, id: &str) -> Self {
        StorageError::NotFound {
            collection,
            id: id.to_string(),
        }
    }
}

/// The four entity collections. Each routes through the mode switch on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Customers,
    Quotes,
    Orders,
    Ledger,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Customers => "customers",
            Collection::Quotes => "quotes",
            Collection::Orders => "orders",
            Collection::Ledger => "ledger",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the shop needs from a primary store.
pub trait PrimaryStore:
    CustomerStore + QuoteStore + OrderStore + LedgerStore + ApprovalStore
{
}

impl<T> PrimaryStore for T where
    T: CustomerStore + QuoteStore + OrderStore + LedgerStore + ApprovalStore
{
}

/// Open the primary store named by configuration.
#[cfg(feature = "sqlite")]
pub async fn init_primary(config: &StorageConfig) -> Result<Arc<dyn PrimaryStore>> {
    info!("Primary storage: sqlite at {}", config.sqlite.path);

    if let Some(parent) = std::path::Path::new(&config.sqlite.path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = sqlx::SqlitePool::connect(&format!("sqlite:{}?mode=rwc", config.sqlite.path)).await?;
    let store = SqliteStore::new(pool);
    store.init().await?;

    Ok(Arc::new(store))
}

/// Open the local mirror named by configuration.
pub fn init_local(config: &StorageConfig) -> Result<local::LocalCollections> {
    info!("Local storage: {}", config.local.dir);
    let backend = local::FileLocalStorage::open(&config.local.dir)?;
    let collections = local::LocalCollections::new(Arc::new(backend));
    if config.local.seed_demo_data {
        local::seed_demo_data(&collections)?;
    }
    Ok(collections)
}

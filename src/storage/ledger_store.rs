//! LedgerStore trait definition.

use async_trait::async_trait;

use super::Result;
use crate::model::{LedgerEntry, NewLedgerEntry};

/// Primary persistence for ledger entries.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// All entries, latest date first.
    async fn list_entries(&self) -> Result<Vec<LedgerEntry>>;

    /// Insert an entry and return its new id.
    async fn add_entry(&self, entry: NewLedgerEntry) -> Result<String>;

    async fn set_entry_paid(&self, id: &str, paid: bool) -> Result<()>;
}

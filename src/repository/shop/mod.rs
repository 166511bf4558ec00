//! Shop repository.
//!
//! Routes every entity operation to the primary store or the local mirror,
//! according to the storage mode fixed at construction.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::StorageMode;
use crate::model::{
    ApprovalPlan, Customer, CustomerUpdate, LedgerEntry, NewCustomer, NewLedgerEntry, NewQuote,
    Order, OrderStatus, Quote, QuoteUpdate,
};
use crate::storage::local::LocalCollections;
use crate::storage::{Collection, PrimaryStore, Result, StorageError};

/// Persistence facade over both stores.
///
/// In primary mode, reads that fail on the primary store are answered from
/// the local mirror instead. The mode itself is never changed by a fallback.
/// Writes always go to the selected store only.
#[derive(Clone)]
pub struct ShopRepository {
    primary: Arc<dyn PrimaryStore>,
    local: LocalCollections,
    mode: StorageMode,
    /// When true, a failed local approval restores the collections it touched.
    local_rollback: bool,
}

impl ShopRepository {
    /// Create a repository with local rollback disabled.
    pub fn new(primary: Arc<dyn PrimaryStore>, local: LocalCollections, mode: StorageMode) -> Self {
        Self {
            primary,
            local,
            mode,
            local_rollback: false,
        }
    }

    /// Create a repository with configurable local rollback.
    pub fn with_config(
        primary: Arc<dyn PrimaryStore>,
        local: LocalCollections,
        mode: StorageMode,
        local_rollback: bool,
    ) -> Self {
        Self {
            primary,
            local,
            mode,
            local_rollback,
        }
    }

    pub fn mode(&self) -> StorageMode {
        self.mode
    }

    pub fn local(&self) -> &LocalCollections {
        &self.local
    }

    async fn read<T, F>(
        &self,
        collection: Collection,
        primary: F,
        local: impl FnOnce(&LocalCollections) -> Result<T>,
    ) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.mode.is_local() {
            return local(&self.local);
        }
        match primary.await {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(
                    collection = %collection,
                    error = %e,
                    "Primary read failed, answering from local storage"
                );
                local(&self.local)
            }
        }
    }

    // --- customers ---

    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.read(
            Collection::Customers,
            self.primary.list_customers(),
            LocalCollections::list_customers,
        )
        .await
    }

    pub async fn add_customer(&self, customer: NewCustomer) -> Result<String> {
        match self.mode {
            StorageMode::Primary => self.primary.add_customer(customer).await,
            StorageMode::Local => self.local.add_customer(customer),
        }
    }

    pub async fn update_customer(&self, id: &str, update: CustomerUpdate) -> Result<()> {
        match self.mode {
            StorageMode::Primary => self.primary.update_customer(id, update).await,
            StorageMode::Local => self.local.update_customer(id, update),
        }
    }

    pub async fn delete_customer(&self, id: &str) -> Result<()> {
        match self.mode {
            StorageMode::Primary => self.primary.delete_customer(id).await,
            StorageMode::Local => self.local.delete_customer(id),
        }
    }

    // --- quotes ---

    /// All quotes, newest first.
    pub async fn list_quotes(&self) -> Result<Vec<Quote>> {
        self.read(
            Collection::Quotes,
            self.primary.list_quotes(),
            LocalCollections::list_quotes,
        )
        .await
    }

    pub async fn get_quote(&self, id: &str) -> Result<Option<Quote>> {
        self.read(Collection::Quotes, self.primary.get_quote(id), |local| {
            local.get_quote(id)
        })
        .await
    }

    pub async fn add_quote(&self, quote: NewQuote) -> Result<String> {
        match self.mode {
            StorageMode::Primary => self.primary.add_quote(quote).await,
            StorageMode::Local => self.local.add_quote(quote),
        }
    }

    pub async fn update_quote(&self, id: &str, update: QuoteUpdate) -> Result<()> {
        match self.mode {
            StorageMode::Primary => self.primary.update_quote(id, update).await,
            StorageMode::Local => self.local.update_quote(id, update),
        }
    }

    /// Mark a quote rejected. Approved quotes refuse the change.
    pub async fn reject_quote(&self, id: &str) -> Result<()> {
        self.update_quote(id, QuoteUpdate::reject()).await
    }

    // --- orders ---

    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        self.read(
            Collection::Orders,
            self.primary.list_orders(),
            LocalCollections::list_orders,
        )
        .await
    }

    /// Whether an order already references `quote_id`.
    pub async fn order_exists_for_quote(&self, quote_id: &str) -> Result<bool> {
        self.read(
            Collection::Orders,
            self.primary.order_exists_for_quote(quote_id),
            |local| local.order_exists_for_quote(quote_id),
        )
        .await
    }

    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<()> {
        match self.mode {
            StorageMode::Primary => self.primary.update_order_status(id, status).await,
            StorageMode::Local => self.local.update_order_status(id, status),
        }
    }

    pub async fn update_order_payment(&self, id: &str, paid: bool) -> Result<()> {
        match self.mode {
            StorageMode::Primary => self.primary.update_order_payment(id, paid).await,
            StorageMode::Local => self.local.update_order_payment(id, paid),
        }
    }

    // --- ledger ---

    /// All ledger entries, newest date first.
    pub async fn list_entries(&self) -> Result<Vec<LedgerEntry>> {
        self.read(
            Collection::Ledger,
            self.primary.list_entries(),
            LocalCollections::list_entries,
        )
        .await
    }

    pub async fn add_entry(&self, entry: NewLedgerEntry) -> Result<String> {
        match self.mode {
            StorageMode::Primary => self.primary.add_entry(entry).await,
            StorageMode::Local => self.local.add_entry(entry),
        }
    }

    pub async fn set_entry_paid(&self, id: &str, paid: bool) -> Result<()> {
        match self.mode {
            StorageMode::Primary => self.primary.set_entry_paid(id, paid).await,
            StorageMode::Local => self.local.set_entry_paid(id, paid),
        }
    }

    /// Flip an entry's paid flag, returning the new value.
    pub async fn toggle_entry_paid(&self, id: &str) -> Result<bool> {
        let entries = match self.mode {
            StorageMode::Primary => self.primary.list_entries().await?,
            StorageMode::Local => self.local.list_entries()?,
        };
        let entry = entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| StorageError::not_found(Collection::Ledger, id))?;
        let paid = !entry.paid;
        self.set_entry_paid(id, paid).await?;
        Ok(paid)
    }

    // --- approval ---

    /// Write an approval to the selected store.
    ///
    /// Atomic against the primary store. Sequential against the local mirror,
    /// restoring the touched collections on failure only when rollback is
    /// enabled.
    pub async fn commit_approval(&self, plan: &ApprovalPlan) -> Result<String> {
        debug!(quote_id = %plan.quote_id, mode = %self.mode, "Committing approval");
        match self.mode {
            StorageMode::Primary => self.primary.commit_approval(plan).await,
            StorageMode::Local => self.local.apply_approval(plan, self.local_rollback),
        }
    }
}

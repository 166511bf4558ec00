//! Mock primary store for testing.
//!
//! Keeps every collection in memory and can be told to fail reads or writes,
//! or to hand back blank ids, so fallback and error paths can be exercised.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    ApprovalStore, Collection, CustomerStore, LedgerStore, OrderStore, QuoteStore, Result,
    StorageError,
};
use crate::model::{
    generate_document_number, ApprovalPlan, Customer, CustomerUpdate, LedgerEntry, NewCustomer,
    NewLedgerEntry, NewQuote, Order, OrderStatus, Quote, QuoteStatus, QuoteUpdate,
    ValidationError, QUOTE_PREFIX,
};

#[derive(Default)]
struct Collections {
    customers: Vec<Customer>,
    quotes: Vec<Quote>,
    orders: Vec<Order>,
    entries: Vec<LedgerEntry>,
}

/// In-memory primary store.
#[derive(Default)]
pub struct MockStore {
    data: RwLock<Collections>,
    fail_on_read: RwLock<bool>,
    fail_on_write: RwLock<bool>,
    blank_ids: RwLock<bool>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_read(&self, fail: bool) {
        *self.fail_on_read.write().await = fail;
    }

    pub async fn set_fail_on_write(&self, fail: bool) {
        *self.fail_on_write.write().await = fail;
    }

    /// Make id-returning writes succeed but hand back an empty id.
    pub async fn set_blank_ids(&self, blank: bool) {
        *self.blank_ids.write().await = blank;
    }

    /// Insert a quote as-is, bypassing validation and id generation.
    pub async fn insert_quote(&self, quote: Quote) {
        self.data.write().await.quotes.push(quote);
    }

    /// Insert an order as-is.
    pub async fn insert_order(&self, order: Order) {
        self.data.write().await.orders.push(order);
    }

    pub async fn order_count(&self) -> usize {
        self.data.read().await.orders.len()
    }

    pub async fn entry_count(&self) -> usize {
        self.data.read().await.entries.len()
    }

    async fn check_read(&self) -> Result<()> {
        if *self.fail_on_read.read().await {
            return Err(StorageError::Unavailable("mock read failure".to_string()));
        }
        Ok(())
    }

    async fn check_write(&self) -> Result<()> {
        if *self.fail_on_write.read().await {
            return Err(StorageError::Unavailable("mock write failure".to_string()));
        }
        Ok(())
    }

    async fn new_id(&self) -> String {
        if *self.blank_ids.read().await {
            return String::new();
        }
        Uuid::new_v4().to_string()
    }
}

#[async_trait]
impl CustomerStore for MockStore {
    async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.check_read().await?;
        Ok(self.data.read().await.customers.clone())
    }

    async fn add_customer(&self, customer: NewCustomer) -> Result<String> {
        self.check_write().await?;
        customer.validate()?;
        let id = self.new_id().await;
        self.data
            .write()
            .await
            .customers
            .push(customer.into_customer(id.clone()));
        Ok(id)
    }

    async fn update_customer(&self, id: &str, update: CustomerUpdate) -> Result<()> {
        self.check_write().await?;
        update.validate()?;
        let mut data = self.data.write().await;
        let customer = data
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StorageError::not_found(Collection::Customers, id))?;
        update.apply(customer);
        Ok(())
    }

    async fn delete_customer(&self, id: &str) -> Result<()> {
        self.check_write().await?;
        self.data.write().await.customers.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl QuoteStore for MockStore {
    async fn list_quotes(&self) -> Result<Vec<Quote>> {
        self.check_read().await?;
        let mut quotes = self.data.read().await.quotes.clone();
        quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quotes)
    }

    async fn get_quote(&self, id: &str) -> Result<Option<Quote>> {
        self.check_read().await?;
        let data = self.data.read().await;
        Ok(data.quotes.iter().find(|q| q.id == id).cloned())
    }

    async fn add_quote(&self, quote: NewQuote) -> Result<String> {
        self.check_write().await?;
        quote.validate()?;
        let id = self.new_id().await;
        let quote = quote.into_quote(
            id.clone(),
            generate_document_number(QUOTE_PREFIX),
            chrono::Utc::now(),
        );
        self.data.write().await.quotes.push(quote);
        Ok(id)
    }

    async fn update_quote(&self, id: &str, update: QuoteUpdate) -> Result<()> {
        self.check_write().await?;
        update.validate()?;
        let mut data = self.data.write().await;
        let quote = data
            .quotes
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| StorageError::not_found(Collection::Quotes, id))?;
        update.apply(quote)?;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for MockStore {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        self.check_read().await?;
        Ok(self.data.read().await.orders.clone())
    }

    async fn order_exists_for_quote(&self, quote_id: &str) -> Result<bool> {
        self.check_read().await?;
        let data = self.data.read().await;
        Ok(data.orders.iter().any(|o| o.quote_id == quote_id))
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<()> {
        self.check_write().await?;
        let mut data = self.data.write().await;
        let order = data
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| StorageError::not_found(Collection::Orders, id))?;
        if !order.status.can_advance_to(status) {
            return Err(ValidationError::StatusTransition {
                entity: "order",
                from: order.status.to_string(),
                to: status.to_string(),
            }
            .into());
        }
        order.status = status;
        Ok(())
    }

    async fn update_order_payment(&self, id: &str, paid: bool) -> Result<()> {
        self.check_write().await?;
        let mut data = self.data.write().await;
        let order = data
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| StorageError::not_found(Collection::Orders, id))?;
        order.paid = paid;
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for MockStore {
    async fn list_entries(&self) -> Result<Vec<LedgerEntry>> {
        self.check_read().await?;
        let mut entries = self.data.read().await.entries.clone();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    async fn add_entry(&self, entry: NewLedgerEntry) -> Result<String> {
        self.check_write().await?;
        entry.validate()?;
        let id = self.new_id().await;
        self.data
            .write()
            .await
            .entries
            .push(entry.into_entry(id.clone()));
        Ok(id)
    }

    async fn set_entry_paid(&self, id: &str, paid: bool) -> Result<()> {
        self.check_write().await?;
        let mut data = self.data.write().await;
        let entry = data
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StorageError::not_found(Collection::Ledger, id))?;
        entry.paid = paid;
        Ok(())
    }
}

#[async_trait]
impl ApprovalStore for MockStore {
    async fn commit_approval(&self, plan: &ApprovalPlan) -> Result<String> {
        self.check_write().await?;
        plan.ledger_entry.validate()?;
        let order_id = self.new_id().await;
        let entry_id = Uuid::new_v4().to_string();

        // Single write guard: the three changes are applied together or not at all.
        let mut data = self.data.write().await;
        let quote = data
            .quotes
            .iter_mut()
            .find(|q| q.id == plan.quote_id)
            .ok_or_else(|| StorageError::not_found(Collection::Quotes, &plan.quote_id))?;
        quote.status = QuoteStatus::Approved;
        data.orders
            .push(plan.order.clone().into_order(order_id.clone()));
        data.entries
            .push(plan.ledger_entry_for(&order_id).into_entry(entry_id));
        Ok(order_id)
    }
}

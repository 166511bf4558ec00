//! Typed collection operations over local storage.

use std::sync::Arc;

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::LocalStorage;
use crate::model::{
    generate_document_number, ApprovalPlan, Customer, CustomerUpdate, LedgerEntry, NewCustomer,
    NewLedgerEntry, NewQuote, Order, OrderStatus, Quote, QuoteStatus, QuoteUpdate,
    ValidationError, QUOTE_PREFIX,
};
use crate::storage::{Collection, Result, StorageError};

/// Key of the customers collection.
pub const CUSTOMERS_KEY: &str = "rochedo_clientes";
/// Key of the quotes collection.
pub const QUOTES_KEY: &str = "rochedo_orcamentos";
/// Key of the orders collection.
pub const ORDERS_KEY: &str = "rochedo_pedidos";
/// Key of the ledger collection.
pub const LEDGER_KEY: &str = "rochedo_financeiro";
/// Key of the persisted local-mode flag.
pub const MODE_FLAG_KEY: &str = "rochedo_mock_auth";

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Random 9-character base-36 id for locally created records.
pub fn local_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// The four entity collections plus the mode flag, stored in local storage.
#[derive(Clone)]
pub struct LocalCollections {
    storage: Arc<dyn LocalStorage>,
}

impl LocalCollections {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<dyn LocalStorage> {
        &self.storage
    }

    /// Whether a collection has ever been written.
    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.storage.get_item(key)?.is_some())
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.storage.get_item(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub(crate) fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.storage.set_item(key, &raw)
    }

    // --- mode flag ---

    pub fn mode_flag(&self) -> Result<bool> {
        Ok(self.storage.get_item(MODE_FLAG_KEY)?.as_deref() == Some("true"))
    }

    pub fn set_mode_flag(&self, local: bool) -> Result<()> {
        if local {
            self.storage.set_item(MODE_FLAG_KEY, "true")
        } else {
            self.storage.remove_item(MODE_FLAG_KEY)
        }
    }

    // --- customers ---

    pub fn list_customers(&self) -> Result<Vec<Customer>> {
        self.load(CUSTOMERS_KEY)
    }

    pub fn add_customer(&self, customer: NewCustomer) -> Result<String> {
        customer.validate()?;
        let mut all: Vec<Customer> = self.load(CUSTOMERS_KEY)?;
        let customer = customer.into_customer(local_id());
        let id = customer.id.clone();
        all.push(customer);
        self.save(CUSTOMERS_KEY, &all)?;
        Ok(id)
    }

    pub fn update_customer(&self, id: &str, update: CustomerUpdate) -> Result<()> {
        update.validate()?;
        let mut all: Vec<Customer> = self.load(CUSTOMERS_KEY)?;
        let customer = all
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StorageError::not_found(Collection::Customers, id))?;
        update.apply(customer);
        self.save(CUSTOMERS_KEY, &all)
    }

    pub fn delete_customer(&self, id: &str) -> Result<()> {
        let mut all: Vec<Customer> = self.load(CUSTOMERS_KEY)?;
        all.retain(|c| c.id != id);
        self.save(CUSTOMERS_KEY, &all)
    }

    // --- quotes ---

    pub fn list_quotes(&self) -> Result<Vec<Quote>> {
        let mut quotes: Vec<Quote> = self.load(QUOTES_KEY)?;
        quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quotes)
    }

    pub fn get_quote(&self, id: &str) -> Result<Option<Quote>> {
        let quotes: Vec<Quote> = self.load(QUOTES_KEY)?;
        Ok(quotes.into_iter().find(|q| q.id == id))
    }

    pub fn add_quote(&self, quote: NewQuote) -> Result<String> {
        quote.validate()?;
        let mut all: Vec<Quote> = self.load(QUOTES_KEY)?;
        let quote = quote.into_quote(
            local_id(),
            generate_document_number(QUOTE_PREFIX),
            chrono::Utc::now(),
        );
        let id = quote.id.clone();
        all.push(quote);
        self.save(QUOTES_KEY, &all)?;
        Ok(id)
    }

    pub fn update_quote(&self, id: &str, update: QuoteUpdate) -> Result<()> {
        update.validate()?;
        let mut all: Vec<Quote> = self.load(QUOTES_KEY)?;
        let quote = all
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| StorageError::not_found(Collection::Quotes, id))?;
        update.apply(quote)?;
        self.save(QUOTES_KEY, &all)
    }

    // --- orders ---

    pub fn list_orders(&self) -> Result<Vec<Order>> {
        self.load(ORDERS_KEY)
    }

    pub fn order_exists_for_quote(&self, quote_id: &str) -> Result<bool> {
        let orders: Vec<Order> = self.load(ORDERS_KEY)?;
        Ok(orders.iter().any(|o| o.quote_id == quote_id))
    }

    pub fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<()> {
        let mut all: Vec<Order> = self.load(ORDERS_KEY)?;
        let order = all
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
        self.save(ORDERS_KEY, &all)
    }

    pub fn update_order_payment(&self, id: &str, paid: bool) -> Result<()> {
        let mut all: Vec<Order> = self.load(ORDERS_KEY)?;
        let order = all
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| StorageError::not_found(Collection::Orders, id))?;
        order.paid = paid;
        self.save(ORDERS_KEY, &all)
    }

    // --- ledger ---

    pub fn list_entries(&self) -> Result<Vec<LedgerEntry>> {
        let mut entries: Vec<LedgerEntry> = self.load(LEDGER_KEY)?;
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    pub fn add_entry(&self, entry: NewLedgerEntry) -> Result<String> {
        entry.validate()?;
        let mut all: Vec<LedgerEntry> = self.load(LEDGER_KEY)?;
        let entry = entry.into_entry(local_id());
        let id = entry.id.clone();
        all.push(entry);
        self.save(LEDGER_KEY, &all)?;
        Ok(id)
    }

    pub fn set_entry_paid(&self, id: &str, paid: bool) -> Result<()> {
        let mut all: Vec<LedgerEntry> = self.load(LEDGER_KEY)?;
        let entry = all
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StorageError::not_found(Collection::Ledger, id))?;
        entry.paid = paid;
        self.save(LEDGER_KEY, &all)
    }

    // --- approval ---

    /// Apply an approval as three sequential collection writes.
    ///
    /// Without `rollback`, a failure part-way leaves the earlier writes in
    /// place. With `rollback`, the three collections are restored to their
    /// prior contents before the error is returned.
    pub fn apply_approval(&self, plan: &ApprovalPlan, rollback: bool) -> Result<String> {
        plan.ledger_entry.validate()?;
        if !rollback {
            return self.write_approval(plan);
        }

        let before = [QUOTES_KEY, ORDERS_KEY, LEDGER_KEY]
            .into_iter()
            .map(|key| -> Result<(&str, Option<String>)> { Ok((key, self.storage.get_item(key)?)) })
            .collect::<Result<Vec<_>>>()?;

        self.write_approval(plan).inspect_err(|e| {
            warn!(quote_id = %plan.quote_id, error = %e, "local approval failed, restoring collections");
            for (key, value) in &before {
                let restored = match value {
                    Some(raw) => self.storage.set_item(key, raw),
                    None => self.storage.remove_item(key),
                };
                if let Err(restore_err) = restored {
                    warn!(key = %key, error = %restore_err, "failed to restore local collection");
                }
            }
        })
    }

    fn write_approval(&self, plan: &ApprovalPlan) -> Result<String> {
        let mut quotes: Vec<Quote> = self.load(QUOTES_KEY)?;
        let quote = quotes
            .iter_mut()
            .find(|q| q.id == plan.quote_id)
            .ok_or_else(|| StorageError::not_found(Collection::Quotes, &plan.quote_id))?;
        quote.status = QuoteStatus::Approved;
        self.save(QUOTES_KEY, &quotes)?;

        let order = plan.order.clone().into_order(local_id());
        let order_id = order.id.clone();
        let mut orders: Vec<Order> = self.load(ORDERS_KEY)?;
        orders.push(order);
        self.save(ORDERS_KEY, &orders)?;

        let mut entries: Vec<LedgerEntry> = self.load(LEDGER_KEY)?;
        entries.push(plan.ledger_entry_for(&order_id).into_entry(local_id()));
        self.save(LEDGER_KEY, &entries)?;

        debug!(quote_id = %plan.quote_id, order_id = %order_id, "local approval written");
        Ok(order_id)
    }
}

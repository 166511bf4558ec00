//! CustomerStore trait definition.

use async_trait::async_trait;

use super::Result;
use crate::model::{Customer, CustomerUpdate, NewCustomer};

/// Primary persistence for customers.
///
/// Implementations:
/// - `SqliteStore`: SQLite storage
/// - `MockStore`: In-memory mock for testing
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All customers, in insertion order.
    async fn list_customers(&self) -> Result<Vec<Customer>>;

    /// Insert a customer and return its new id.
    async fn add_customer(&self, customer: NewCustomer) -> Result<String>;

    /// Merge `update` into an existing customer.
    async fn update_customer(&self, id: &str, update: CustomerUpdate) -> Result<()>;

    async fn delete_customer(&self, id: &str) -> Result<()>;
}

//! SQLite implementation of the primary store.
//!
//! One `SqliteStore` backs all four collections and the approval
//! transaction. Records are read and written with sea-query generated SQL.

mod approval_store;
mod customer_store;
mod ledger_store;
mod order_store;
mod quote_store;
mod rows;

use sqlx::SqlitePool;
use uuid::Uuid;

use super::schema::{
    CREATE_CUSTOMERS_TABLE, CREATE_LEDGER_ENTRIES_TABLE, CREATE_ORDERS_TABLE, CREATE_QUOTES_TABLE,
};
use super::Result;

/// SQLite primary store.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new SQLite store over an open pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init(&self) -> Result<()> {
        for ddl in [
            CREATE_CUSTOMERS_TABLE,
            CREATE_QUOTES_TABLE,
            CREATE_ORDERS_TABLE,
            CREATE_LEDGER_ENTRIES_TABLE,
        ] {
            sqlx::query(ddl).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn new_id() -> String {
        Uuid::new_v4().to_string()
    }
}

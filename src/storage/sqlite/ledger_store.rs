//! SQLite LedgerStore implementation.

use async_trait::async_trait;
use sea_query::{Expr, Order, Query, SqliteQueryBuilder};
use sqlx::SqliteConnection;

use super::{rows, SqliteStore};
use crate::model::{LedgerEntry, NewLedgerEntry};
use crate::storage::schema::LedgerEntries;
use crate::storage::{Collection, LedgerStore, Result, StorageError};

impl SqliteStore {
    /// Insert an entry on an existing connection, so the approval
    /// transaction can reuse it.
    pub(super) async fn insert_entry(
        conn: &mut SqliteConnection,
        id: &str,
        entry: NewLedgerEntry,
    ) -> Result<()> {
        entry.validate()?;
        let entry = entry.into_entry(id.to_string());

        let query = Query::insert()
            .into_table(LedgerEntries::Table)
            .columns([
                LedgerEntries::Id,
                LedgerEntries::Description,
                LedgerEntries::Amount,
                LedgerEntries::EntryDate,
                LedgerEntries::EntryType,
                LedgerEntries::Category,
                LedgerEntries::Paid,
                LedgerEntries::ReferenceId,
                LedgerEntries::CreatedAt,
            ])
            .values_panic([
                entry.id.into(),
                entry.description.into(),
                entry.amount.to_string().into(),
                entry.date.format("%Y-%m-%d").to_string().into(),
                entry.entry_type.as_str().into(),
                entry.category.into(),
                entry.paid.into(),
                entry.reference_id.into(),
                rows::format_timestamp(&chrono::Utc::now()).into(),
            ])
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(&mut *conn).await?;
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for SqliteStore {
    async fn list_entries(&self) -> Result<Vec<LedgerEntry>> {
        let query = rows::select_entries()
            .order_by(LedgerEntries::EntryDate, Order::Desc)
            .order_by(LedgerEntries::CreatedAt, Order::Desc)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(self.pool()).await?;
        rows.iter().map(rows::entry).collect()
    }

    async fn add_entry(&self, entry: NewLedgerEntry) -> Result<String> {
        let id = Self::new_id();
        let mut conn = self.pool().acquire().await?;
        Self::insert_entry(&mut conn, &id, entry).await?;
        Ok(id)
    }

    async fn set_entry_paid(&self, id: &str, paid: bool) -> Result<()> {
        let query = Query::update()
            .table(LedgerEntries::Table)
            .values([(LedgerEntries::Paid, paid.into())])
            .and_where(Expr::col(LedgerEntries::Id).eq(id))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(self.pool()).await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::not_found(Collection::Ledger, id));
        }
        Ok(())
    }
}

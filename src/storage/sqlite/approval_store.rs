//! SQLite ApprovalStore implementation.

use async_trait::async_trait;
use sea_query::{Expr, Query, SqliteQueryBuilder};
use sqlx::SqliteConnection;
use tracing::debug;

use super::{rows, SqliteStore};
use crate::model::{ApprovalPlan, QuoteStatus};
use crate::storage::schema::{Orders, Quotes};
use crate::storage::{ApprovalStore, Collection, Result, StorageError};

impl SqliteStore {
    /// Apply the approval writes within an already-started transaction.
    async fn write_approval(
        conn: &mut SqliteConnection,
        plan: &ApprovalPlan,
        order_id: &str,
        entry_id: &str,
    ) -> Result<()> {
        let query = Query::update()
            .table(Quotes::Table)
            .values([(Quotes::Status, QuoteStatus::Approved.as_str().into())])
            .and_where(Expr::col(Quotes::Id).eq(plan.quote_id.as_str()))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&mut *conn).await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::not_found(Collection::Quotes, &plan.quote_id));
        }

        let order = plan.order.clone().into_order(order_id.to_string());
        let query = Query::insert()
            .into_table(Orders::Table)
            .columns([
                Orders::Id,
                Orders::DocumentNumber,
                Orders::QuoteId,
                Orders::CustomerId,
                Orders::CustomerName,
                Orders::Description,
                Orders::FinalAmount,
                Orders::Status,
                Orders::Paid,
                Orders::DeliveryDate,
                Orders::ApprovedAt,
            ])
            .values_panic([
                order.id.into(),
                order.document_number.into(),
                order.quote_id.into(),
                order.customer_id.into(),
                order.customer_name.into(),
                order.description.into(),
                order.final_amount.to_string().into(),
                order.status.as_str().into(),
                order.paid.into(),
                order.delivery_date.into(),
                order.approved_at.map(|at| rows::format_timestamp(&at)).into(),
            ])
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(&mut *conn).await?;

        Self::insert_entry(conn, entry_id, plan.ledger_entry_for(order_id)).await
    }
}

#[async_trait]
impl ApprovalStore for SqliteStore {
    async fn commit_approval(&self, plan: &ApprovalPlan) -> Result<String> {
        let order_id = Self::new_id();
        let entry_id = Self::new_id();

        // BEGIN IMMEDIATE takes the write lock upfront so the quote update and
        // both inserts land in one serialized transaction.
        let mut conn = self.pool().acquire().await?;
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

        let result = Self::write_approval(&mut conn, plan, &order_id, &entry_id).await;

        match result {
            Ok(()) => {
                sqlx::query("COMMIT").execute(&mut *conn).await?;
                debug!(quote_id = %plan.quote_id, order_id = %order_id, "approval committed");
                Ok(order_id)
            }
            Err(e) => {
                let _ = sqlx::query("ROLLBACK").execute(&mut *conn).await;
                Err(e)
            }
        }
    }
}

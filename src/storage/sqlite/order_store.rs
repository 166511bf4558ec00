//! SQLite OrderStore implementation.

use async_trait::async_trait;
use sea_query::{Expr, Query, SqliteQueryBuilder};

use super::{rows, SqliteStore};
use crate::model::{Order, OrderStatus, ValidationError};
use crate::storage::schema::Orders;
use crate::storage::{Collection, OrderStore, Result, StorageError};

impl SqliteStore {
    async fn fetch_order(&self, id: &str) -> Result<Order> {
        let query = rows::select_orders()
            .and_where(Expr::col(Orders::Id).eq(id))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| StorageError::not_found(Collection::Orders, id))?;
        rows::order(&row)
    }
}

#[async_trait]
impl OrderStore for SqliteStore {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        let query = rows::select_orders()
            .order_by(Orders::ApprovedAt, sea_query::Order::Desc)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(self.pool()).await?;
        rows.iter().map(rows::order).collect()
    }

    async fn order_exists_for_quote(&self, quote_id: &str) -> Result<bool> {
        let query = Query::select()
            .column(Orders::Id)
            .from(Orders::Table)
            .and_where(Expr::col(Orders::QuoteId).eq(quote_id))
            .limit(1)
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_optional(self.pool()).await?;
        Ok(row.is_some())
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<()> {
        let order = self.fetch_order(id).await?;
        if !order.status.can_advance_to(status) {
            return Err(ValidationError::StatusTransition {
                entity: "order",
                from: order.status.to_string(),
                to: status.to_string(),
            }
            .into());
        }

        let query = Query::update()
            .table(Orders::Table)
            .values([(Orders::Status, status.as_str().into())])
            .and_where(Expr::col(Orders::Id).eq(id))
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(self.pool()).await?;
        Ok(())
    }

    async fn update_order_payment(&self, id: &str, paid: bool) -> Result<()> {
        let query = Query::update()
            .table(Orders::Table)
            .values([(Orders::Paid, paid.into())])
            .and_where(Expr::col(Orders::Id).eq(id))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(self.pool()).await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::not_found(Collection::Orders, id));
        }
        Ok(())
    }
}

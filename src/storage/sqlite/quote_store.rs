//! SQLite QuoteStore implementation.

use async_trait::async_trait;
use sea_query::{Expr, Order, Query, SqliteQueryBuilder};
use tracing::debug;

use super::{rows, SqliteStore};
use crate::model::{generate_document_number, NewQuote, Quote, QuoteUpdate, QUOTE_PREFIX};
use crate::storage::schema::Quotes;
use crate::storage::{Collection, QuoteStore, Result, StorageError};

#[async_trait]
impl QuoteStore for SqliteStore {
    async fn list_quotes(&self) -> Result<Vec<Quote>> {
        let query = rows::select_quotes()
            .order_by(Quotes::CreatedAt, Order::Desc)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(self.pool()).await?;
        rows.iter().map(rows::quote).collect()
    }

    async fn get_quote(&self, id: &str) -> Result<Option<Quote>> {
        let query = rows::select_quote_by_id(id);
        let row = sqlx::query(&query).fetch_optional(self.pool()).await?;
        row.as_ref().map(rows::quote).transpose()
    }

    async fn add_quote(&self, quote: NewQuote) -> Result<String> {
        quote.validate()?;
        let quote = quote.into_quote(
            Self::new_id(),
            generate_document_number(QUOTE_PREFIX),
            chrono::Utc::now(),
        );

        let query = Query::insert()
            .into_table(Quotes::Table)
            .columns([
                Quotes::Id,
                Quotes::DocumentNumber,
                Quotes::CustomerId,
                Quotes::CustomerName,
                Quotes::Description,
                Quotes::Material,
                Quotes::Area,
                Quotes::Amount,
                Quotes::Status,
                Quotes::CreatedAt,
            ])
            .values_panic([
                quote.id.clone().into(),
                quote.document_number.clone().into(),
                quote.customer_id.into(),
                quote.customer_name.into(),
                quote.description.into(),
                quote.material.into(),
                quote.area.to_string().into(),
                quote.amount.to_string().into(),
                quote.status.as_str().into(),
                rows::format_timestamp(&quote.created_at).into(),
            ])
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(self.pool()).await?;
        debug!(quote_id = %quote.id, document_number = %quote.document_number, "quote added");
        Ok(quote.id)
    }

    async fn update_quote(&self, id: &str, update: QuoteUpdate) -> Result<()> {
        update.validate()?;
        let mut quote = self
            .get_quote(id)
            .await?
            .ok_or_else(|| StorageError::not_found(Collection::Quotes, id))?;
        update.apply(&mut quote)?;

        let query = Query::update()
            .table(Quotes::Table)
            .values([
                (Quotes::CustomerId, quote.customer_id.into()),
                (Quotes::CustomerName, quote.customer_name.into()),
                (Quotes::Description, quote.description.into()),
                (Quotes::Material, quote.material.into()),
                (Quotes::Area, quote.area.to_string().into()),
                (Quotes::Amount, quote.amount.to_string().into()),
                (Quotes::Status, quote.status.as_str().into()),
            ])
            .and_where(Expr::col(Quotes::Id).eq(id))
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(self.pool()).await?;
        Ok(())
    }
}

//! SQLite CustomerStore implementation.

use async_trait::async_trait;
use sea_query::{Expr, Order, Query, SqliteQueryBuilder};
use tracing::debug;

use super::{rows, SqliteStore};
use crate::model::{Customer, CustomerUpdate, NewCustomer};
use crate::storage::schema::Customers;
use crate::storage::{Collection, CustomerStore, Result, StorageError};

impl SqliteStore {
    async fn fetch_customer(&self, id: &str) -> Result<Customer> {
        let query = rows::select_customers()
            .and_where(Expr::col(Customers::Id).eq(id))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| StorageError::not_found(Collection::Customers, id))?;
        rows::customer(&row)
    }
}

#[async_trait]
impl CustomerStore for SqliteStore {
    async fn list_customers(&self) -> Result<Vec<Customer>> {
        let query = rows::select_customers()
            .order_by(Customers::CreatedAt, Order::Asc)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(self.pool()).await?;
        rows.iter().map(rows::customer).collect()
    }

    async fn add_customer(&self, customer: NewCustomer) -> Result<String> {
        customer.validate()?;
        let customer = customer.into_customer(Self::new_id());
        let created_at = rows::format_timestamp(&chrono::Utc::now());

        let query = Query::insert()
            .into_table(Customers::Table)
            .columns([
                Customers::Id,
                Customers::Name,
                Customers::Document,
                Customers::Email,
                Customers::Phone,
                Customers::Address,
                Customers::Notes,
                Customers::CreatedAt,
            ])
            .values_panic([
                customer.id.clone().into(),
                customer.name.into(),
                customer.document.into(),
                customer.email.into(),
                customer.phone.into(),
                customer.address.into(),
                customer.notes.into(),
                created_at.into(),
            ])
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(self.pool()).await?;
        debug!(customer_id = %customer.id, "customer added");
        Ok(customer.id)
    }

    async fn update_customer(&self, id: &str, update: CustomerUpdate) -> Result<()> {
        update.validate()?;
        let mut customer = self.fetch_customer(id).await?;
        update.apply(&mut customer);

        let query = Query::update()
            .table(Customers::Table)
            .values([
                (Customers::Name, customer.name.into()),
                (Customers::Document, customer.document.into()),
                (Customers::Email, customer.email.into()),
                (Customers::Phone, customer.phone.into()),
                (Customers::Address, customer.address.into()),
                (Customers::Notes, customer.notes.into()),
            ])
            .and_where(Expr::col(Customers::Id).eq(id))
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(self.pool()).await?;
        Ok(())
    }

    async fn delete_customer(&self, id: &str) -> Result<()> {
        let query = Query::delete()
            .from_table(Customers::Table)
            .and_where(Expr::col(Customers::Id).eq(id))
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(self.pool()).await?;
        Ok(())
    }
}

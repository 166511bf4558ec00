//! Row decoding for the SQLite store.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use sea_query::{Expr, Query, SelectStatement, SqliteQueryBuilder};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::model::{Customer, LedgerEntry, Order, Quote};
use crate::storage::schema::{Customers, LedgerEntries, Orders, Quotes};
use crate::storage::{Collection, Result, StorageError};

fn corrupt(collection: Collection, reason: impl std::fmt::Display) -> StorageError {
    StorageError::Corrupt {
        collection,
        reason: reason.to_string(),
    }
}

fn parse<T>(collection: Collection, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| corrupt(collection, format!("{}: {:?}", e, raw)))
}

fn decimal(collection: Collection, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw).map_err(|e| corrupt(collection, format!("{}: {:?}", e, raw)))
}

/// Fixed-width UTC text, so lexical order matches time order.
pub(super) fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn timestamp(collection: Collection, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| corrupt(collection, format!("{}: {:?}", e, raw)))
}

fn date(collection: Collection, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| corrupt(collection, format!("{}: {:?}", e, raw)))
}

pub(super) fn select_customers() -> SelectStatement {
    Query::select()
        .columns([
            Customers::Id,
            Customers::Name,
            Customers::Document,
            Customers::Email,
            Customers::Phone,
            Customers::Address,
            Customers::Notes,
        ])
        .from(Customers::Table)
        .to_owned()
}

pub(super) fn customer(row: &SqliteRow) -> Result<Customer> {
    Ok(Customer {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        document: row.try_get("document")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        address: row.try_get("address")?,
        notes: row.try_get("notes")?,
    })
}

pub(super) fn select_quotes() -> SelectStatement {
    Query::select()
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
        .from(Quotes::Table)
        .to_owned()
}

pub(super) fn select_quote_by_id(id: &str) -> String {
    select_quotes()
        .and_where(Expr::col(Quotes::Id).eq(id))
        .to_string(SqliteQueryBuilder)
}

pub(super) fn quote(row: &SqliteRow) -> Result<Quote> {
    let c = Collection::Quotes;
    let area: String = row.try_get("area")?;
    let amount: String = row.try_get("amount")?;
    let status: String = row.try_get("status")?;
    let created_at: String = row.try_get("created_at")?;
    Ok(Quote {
        id: row.try_get("id")?,
        document_number: row.try_get("document_number")?,
        customer_id: row.try_get("customer_id")?,
        customer_name: row.try_get("customer_name")?,
        description: row.try_get("description")?,
        material: row.try_get("material")?,
        area: decimal(c, &area)?,
        amount: decimal(c, &amount)?,
        status: parse(c, &status)?,
        created_at: timestamp(c, &created_at)?,
    })
}

pub(super) fn select_orders() -> SelectStatement {
    Query::select()
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
        .from(Orders::Table)
        .to_owned()
}

pub(super) fn order(row: &SqliteRow) -> Result<Order> {
    let c = Collection::Orders;
    let final_amount: String = row.try_get("final_amount")?;
    let status: String = row.try_get("status")?;
    let approved_at: Option<String> = row.try_get("approved_at")?;
    Ok(Order {
        id: row.try_get("id")?,
        document_number: row.try_get("document_number")?,
        quote_id: row.try_get("quote_id")?,
        customer_id: row.try_get("customer_id")?,
        customer_name: row.try_get("customer_name")?,
        description: row.try_get("description")?,
        final_amount: decimal(c, &final_amount)?,
        status: parse(c, &status)?,
        paid: row.try_get("paid")?,
        delivery_date: row.try_get("delivery_date")?,
        approved_at: approved_at.as_deref().map(|raw| timestamp(c, raw)).transpose()?,
    })
}

pub(super) fn select_entries() -> SelectStatement {
    Query::select()
        .columns([
            LedgerEntries::Id,
            LedgerEntries::Description,
            LedgerEntries::Amount,
            LedgerEntries::EntryDate,
            LedgerEntries::EntryType,
            LedgerEntries::Category,
            LedgerEntries::Paid,
            LedgerEntries::ReferenceId,
        ])
        .from(LedgerEntries::Table)
        .to_owned()
}

pub(super) fn entry(row: &SqliteRow) -> Result<LedgerEntry> {
    let c = Collection::Ledger;
    let amount: String = row.try_get("amount")?;
    let entry_date: String = row.try_get("entry_date")?;
    let entry_type: String = row.try_get("entry_type")?;
    Ok(LedgerEntry {
        id: row.try_get("id")?,
        description: row.try_get("description")?,
        amount: decimal(c, &amount)?,
        date: date(c, &entry_date)?,
        entry_type: parse(c, &entry_type)?,
        category: row.try_get("category")?,
        paid: row.try_get("paid")?,
        reference_id: row.try_get("reference_id")?,
    })
}

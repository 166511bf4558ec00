//! Database schema definitions using sea-query.
//!
//! These define the table and column identifiers for type-safe query building.
//! Money and area columns hold decimal strings so no precision is lost.

use sea_query::Iden;

/// Customers table schema.
#[derive(Iden)]
pub enum Customers {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "name"]
    Name,
    #[iden = "document"]
    Document,
    #[iden = "email"]
    Email,
    #[iden = "phone"]
    Phone,
    #[iden = "address"]
    Address,
    #[iden = "notes"]
    Notes,
    #[iden = "created_at"]
    CreatedAt,
}

/// Quotes table schema.
#[derive(Iden)]
pub enum Quotes {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "document_number"]
    DocumentNumber,
    #[iden = "customer_id"]
    CustomerId,
    #[iden = "customer_name"]
    CustomerName,
    #[iden = "description"]
    Description,
    #[iden = "material"]
    Material,
    #[iden = "area"]
    Area,
    #[iden = "amount"]
    Amount,
    #[iden = "status"]
    Status,
    #[iden = "created_at"]
    CreatedAt,
}

/// Orders table schema.
#[derive(Iden)]
pub enum Orders {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "document_number"]
    DocumentNumber,
    #[iden = "quote_id"]
    QuoteId,
    #[iden = "customer_id"]
    CustomerId,
    #[iden = "customer_name"]
    CustomerName,
    #[iden = "description"]
    Description,
    #[iden = "final_amount"]
    FinalAmount,
    #[iden = "status"]
    Status,
    #[iden = "paid"]
    Paid,
    #[iden = "delivery_date"]
    DeliveryDate,
    #[iden = "approved_at"]
    ApprovedAt,
}

/// Ledger entries table schema.
#[derive(Iden)]
pub enum LedgerEntries {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "description"]
    Description,
    #[iden = "amount"]
    Amount,
    #[iden = "entry_date"]
    EntryDate,
    #[iden = "entry_type"]
    EntryType,
    #[iden = "category"]
    Category,
    #[iden = "paid"]
    Paid,
    #[iden = "reference_id"]
    ReferenceId,
    #[iden = "created_at"]
    CreatedAt,
}

/// SQL for creating the customers table.
pub const CREATE_CUSTOMERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    document TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    address TEXT NOT NULL,
    notes TEXT,
    created_at TEXT NOT NULL
);
"#;

/// SQL for creating the quotes table.
pub const CREATE_QUOTES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS quotes (
    id TEXT PRIMARY KEY,
    document_number TEXT NOT NULL,
    customer_id TEXT NOT NULL,
    customer_name TEXT NOT NULL,
    description TEXT NOT NULL,
    material TEXT NOT NULL,
    area TEXT NOT NULL,
    amount TEXT NOT NULL,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_quotes_created_at ON quotes(created_at);
"#;

/// SQL for creating the orders table.
///
/// `quote_id` is indexed but deliberately not unique: one order per quote
/// is enforced by the approval workflow's duplicate check.
pub const CREATE_ORDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id TEXT PRIMARY KEY,
    document_number TEXT NOT NULL,
    quote_id TEXT NOT NULL,
    customer_id TEXT NOT NULL,
    customer_name TEXT NOT NULL,
    description TEXT NOT NULL,
    final_amount TEXT NOT NULL,
    status TEXT NOT NULL,
    paid INTEGER NOT NULL DEFAULT 0,
    delivery_date TEXT NOT NULL,
    approved_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_orders_quote_id ON orders(quote_id);
"#;

/// SQL for creating the ledger entries table.
pub const CREATE_LEDGER_ENTRIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS ledger_entries (
    id TEXT PRIMARY KEY,
    description TEXT NOT NULL,
    amount TEXT NOT NULL,
    entry_date TEXT NOT NULL,
    entry_type TEXT NOT NULL,
    category TEXT NOT NULL,
    paid INTEGER NOT NULL DEFAULT 0,
    reference_id TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_ledger_entries_date ON ledger_entries(entry_date);
"#;

//! Domain records for the shop back office.
//!
//! Every collection has a stored record type (`Customer`, `Quote`, `Order`,
//! `LedgerEntry`), a draft type accepted on insert (`New*`), and, where the
//! record is editable, a partial update type (`*Update`). Drafts and updates
//! are validated at the store boundary before anything is written.

mod approval;
mod customer;
mod document;
mod ledger;
mod order;
mod quote;
mod validation;

pub use approval::ApprovalPlan;
pub use customer::{Customer, CustomerUpdate, NewCustomer};
pub use document::{generate_document_number, ORDER_PREFIX, QUOTE_PREFIX};
pub use ledger::{EntryType, LedgerEntry, NewLedgerEntry, SALE_CATEGORY};
pub use order::{NewOrder, Order, OrderStatus};
pub use quote::{NewQuote, Quote, QuoteStatus, QuoteUpdate};
pub use validation::ValidationError;

//! The write set produced by approving a quote.

use chrono::{DateTime, Utc};

use super::document::{generate_document_number, ORDER_PREFIX};
use super::ledger::{EntryType, NewLedgerEntry, SALE_CATEGORY};
use super::order::NewOrder;
use super::quote::Quote;

/// Everything a store must write, as one unit, to approve a quote.
///
/// The ledger entry's `reference_id` is left empty: the store assigns the
/// order id and links the entry to it inside the same unit of work.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalPlan {
    pub quote_id: String,
    pub order: NewOrder,
    pub ledger_entry: NewLedgerEntry,
}

impl ApprovalPlan {
    /// Build the plan with a freshly generated order document number.
    pub fn for_quote(quote: &Quote, delivery_date: &str, now: DateTime<Utc>) -> Self {
        Self::with_document_number(
            quote,
            delivery_date,
            generate_document_number(ORDER_PREFIX),
            now,
        )
    }

    pub fn with_document_number(
        quote: &Quote,
        delivery_date: &str,
        document_number: String,
        now: DateTime<Utc>,
    ) -> Self {
        let ledger_entry = NewLedgerEntry {
            description: format!("Order {} - {}", document_number, quote.customer_name),
            amount: quote.amount,
            date: now.date_naive(),
            entry_type: EntryType::Income,
            category: SALE_CATEGORY.to_string(),
            paid: false,
            reference_id: None,
        };
        let order = NewOrder {
            document_number,
            quote_id: quote.id.clone(),
            customer_id: quote.customer_id.clone(),
            customer_name: quote.customer_name.clone(),
            description: quote.description.clone(),
            final_amount: quote.amount,
            delivery_date: delivery_date.to_string(),
            approved_at: now,
        };
        Self {
            quote_id: quote.id.clone(),
            order,
            ledger_entry,
        }
    }

    /// The ledger entry linked to the order the store created.
    pub fn ledger_entry_for(&self, order_id: &str) -> NewLedgerEntry {
        NewLedgerEntry {
            reference_id: Some(order_id.to_string()),
            ..self.ledger_entry.clone()
        }
    }
}

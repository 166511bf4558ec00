//! QuoteStore trait definition.

use async_trait::async_trait;

use super::Result;
use crate::model::{NewQuote, Quote, QuoteUpdate};

/// Primary persistence for quotes.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// All quotes, newest first.
    async fn list_quotes(&self) -> Result<Vec<Quote>>;

    /// Fetch one quote. Returns `None` if it does not exist.
    async fn get_quote(&self, id: &str) -> Result<Option<Quote>>;

    /// Insert a pending quote with a generated document number and return its id.
    async fn add_quote(&self, quote: NewQuote) -> Result<String>;

    /// Merge `update` into an existing quote.
    ///
    /// Fails with a validation error if the update would change the status
    /// of an approved quote or approve a quote outside the approval workflow.
    async fn update_quote(&self, id: &str, update: QuoteUpdate) -> Result<()>;
}

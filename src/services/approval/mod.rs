//! Quote approval.
//!
//! Converts a pending quote into one order and one income ledger entry,
//! refusing quotes that already have an order.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::model::{ApprovalPlan, Quote, QuoteStatus};
use crate::repository::ShopRepository;
use crate::storage::StorageError;

/// Result type for approval operations.
pub type Result<T> = std::result::Result<T, ApprovalError>;

/// Errors that can occur while approving a quote.
#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    #[error("Quote {quote_id} has already been converted into an order")]
    DuplicateConversion { quote_id: String },

    #[error("Quote {quote_id} is {status}, only pending quotes can be approved")]
    QuoteNotPending {
        quote_id: String,
        status: QuoteStatus,
    },

    #[error("Quote not found: {0}")]
    QuoteNotFound(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),

    #[error("Approval of quote {quote_id} returned no order id")]
    MissingResult { quote_id: String },
}

impl ApprovalError {
    /// Text safe to show to the person who pressed "approve".
    pub fn user_message(&self) -> &'static str {
        match self {
            ApprovalError::DuplicateConversion { .. } => {
                "This quote has already been converted into an order."
            }
            ApprovalError::QuoteNotPending { .. } => "Only pending quotes can be approved.",
            ApprovalError::QuoteNotFound(_) => "Quote not found.",
            ApprovalError::StoreUnavailable(_) => "Error approving quote. Please try again.",
            ApprovalError::MissingResult { .. } => {
                "The approval was saved but no order was returned. Please check the orders list."
            }
        }
    }
}

/// Approval workflow over the shop repository.
pub struct ApprovalService {
    repository: Arc<ShopRepository>,
}

impl ApprovalService {
    pub fn new(repository: Arc<ShopRepository>) -> Self {
        Self { repository }
    }

    /// Approve `quote`, returning the id of the new order.
    ///
    /// The duplicate check runs first and nothing is written when it fails.
    /// `delivery_date` is stored on the order exactly as given.
    pub async fn approve(&self, quote: &Quote, delivery_date: &str) -> Result<String> {
        info!(
            quote_id = %quote.id,
            mode = %self.repository.mode(),
            "Approving quote"
        );

        if self.repository.order_exists_for_quote(&quote.id).await? {
            warn!(quote_id = %quote.id, "Quote already has an order, approval refused");
            return Err(ApprovalError::DuplicateConversion {
                quote_id: quote.id.clone(),
            });
        }

        if quote.status != QuoteStatus::Pending {
            return Err(ApprovalError::QuoteNotPending {
                quote_id: quote.id.clone(),
                status: quote.status,
            });
        }

        let plan = ApprovalPlan::for_quote(quote, delivery_date, Utc::now());
        let order_id = self.repository.commit_approval(&plan).await?;
        if order_id.is_empty() {
            return Err(ApprovalError::MissingResult {
                quote_id: quote.id.clone(),
            });
        }

        info!(
            quote_id = %quote.id,
            order_id = %order_id,
            document_number = %plan.order.document_number,
            "Quote approved"
        );
        Ok(order_id)
    }

    /// Look the quote up, then approve it.
    pub async fn approve_by_id(&self, quote_id: &str, delivery_date: &str) -> Result<String> {
        let quote = self
            .repository
            .get_quote(quote_id)
            .await?
            .ok_or_else(|| ApprovalError::QuoteNotFound(quote_id.to_string()))?;
        self.approve(&quote, delivery_date).await
    }
}

//! Quotes: priced proposals waiting for the customer's answer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::{require_non_negative, require_text, ValidationError};

const ENTITY: &str = "quote";

/// Quote lifecycle state.
///
/// A quote starts `Pending`. `Approved` is terminal and is only reached
/// through the approval workflow, never through a plain update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::Approved => "approved",
            QuoteStatus::Rejected => "rejected",
        }
    }

    /// Whether a manual edit may move a quote from `self` to `next`.
    pub fn can_edit_to(&self, next: QuoteStatus) -> bool {
        match (self, next) {
            (from, to) if *from == to => true,
            (_, QuoteStatus::Approved) => false,
            (QuoteStatus::Approved, _) => false,
            _ => true,
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(QuoteStatus::Pending),
            "approved" => Ok(QuoteStatus::Approved),
            "rejected" => Ok(QuoteStatus::Rejected),
            other => Err(ValidationError::UnknownVariant {
                entity: "quote status",
                value: other.to_string(),
            }),
        }
    }
}

/// A priced proposal for a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub document_number: String,
    pub customer_id: String,
    /// Denormalized so listings and printed documents need no join.
    pub customer_name: String,
    pub description: String,
    pub material: String,
    /// Square meters.
    pub area: Decimal,
    pub amount: Decimal,
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
}

/// Quote draft accepted on insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuote {
    pub customer_id: String,
    pub customer_name: String,
    pub description: String,
    pub material: String,
    pub area: Decimal,
    pub amount: Decimal,
}

impl NewQuote {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(ENTITY, "customer_id", &self.customer_id)?;
        require_non_negative(ENTITY, "area", self.area)?;
        require_non_negative(ENTITY, "amount", self.amount)
    }

    /// Build the stored record. New quotes are always pending.
    pub fn into_quote(self, id: String, document_number: String, created_at: DateTime<Utc>) -> Quote {
        Quote {
            id,
            document_number,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            description: self.description,
            material: self.material,
            area: self.area,
            amount: self.amount,
            status: QuoteStatus::Pending,
            created_at,
        }
    }
}

/// Partial quote update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteUpdate {
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub description: Option<String>,
    pub material: Option<String>,
    pub area: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub status: Option<QuoteStatus>,
}

impl QuoteUpdate {
    /// Reject a pending quote.
    pub fn reject() -> Self {
        Self {
            status: Some(QuoteStatus::Rejected),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(customer_id) = &self.customer_id {
            require_text(ENTITY, "customer_id", customer_id)?;
        }
        if let Some(area) = self.area {
            require_non_negative(ENTITY, "area", area)?;
        }
        if let Some(amount) = self.amount {
            require_non_negative(ENTITY, "amount", amount)?;
        }
        Ok(())
    }

    /// Merge into `quote`, refusing status edits the lifecycle forbids.
    pub fn apply(&self, quote: &mut Quote) -> Result<(), ValidationError> {
        if let Some(status) = self.status {
            if !quote.status.can_edit_to(status) {
                return Err(ValidationError::StatusTransition {
                    entity: ENTITY,
                    from: quote.status.to_string(),
                    to: status.to_string(),
                });
            }
            quote.status = status;
        }
        if let Some(customer_id) = &self.customer_id {
            quote.customer_id = customer_id.clone();
        }
        if let Some(customer_name) = &self.customer_name {
            quote.customer_name = customer_name.clone();
        }
        if let Some(description) = &self.description {
            quote.description = description.clone();
        }
        if let Some(material) = &self.material {
            quote.material = material.clone();
        }
        if let Some(area) = self.area {
            quote.area = area;
        }
        if let Some(amount) = self.amount {
            quote.amount = amount;
        }
        Ok(())
    }
}

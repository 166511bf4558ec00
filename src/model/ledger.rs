//! Ledger entries: dated income and expense records.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::{require_non_negative, require_text, ValidationError};

const ENTITY: &str = "ledger entry";

/// Category assigned to income generated by quote approval.
pub const SALE_CATEGORY: &str = "Sale";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "income",
            EntryType::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(EntryType::Income),
            "expense" => Ok(EntryType::Expense),
            other => Err(ValidationError::UnknownVariant {
                entity: "entry type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub category: String,
    pub paid: bool,
    /// Order that produced this entry, if any.
    #[serde(default)]
    pub reference_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLedgerEntry {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub category: String,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub reference_id: Option<String>,
}

impl NewLedgerEntry {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(ENTITY, "description", &self.description)?;
        require_text(ENTITY, "category", &self.category)?;
        require_non_negative(ENTITY, "amount", self.amount)
    }

    pub fn into_entry(self, id: String) -> LedgerEntry {
        LedgerEntry {
            id,
            description: self.description,
            amount: self.amount,
            date: self.date,
            entry_type: self.entry_type,
            category: self.category,
            paid: self.paid,
            reference_id: self.reference_id,
        }
    }
}

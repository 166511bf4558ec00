//! Orders: accepted work moving through the workshop.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// Workshop stage of an order. Stages only move forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Production,
    Installation,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Production => "production",
            OrderStatus::Installation => "installation",
            OrderStatus::Completed => "completed",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            OrderStatus::Production => 0,
            OrderStatus::Installation => 1,
            OrderStatus::Completed => 2,
        }
    }

    /// Stages may be skipped or re-selected but never reverted.
    pub fn can_advance_to(&self, next: OrderStatus) -> bool {
        next.rank() >= self.rank()
    }

    pub fn is_open(&self) -> bool {
        *self != OrderStatus::Completed
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(OrderStatus::Production),
            "installation" => Ok(OrderStatus::Installation),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(ValidationError::UnknownVariant {
                entity: "order status",
                value: other.to_string(),
            }),
        }
    }
}

/// Work accepted for production, created from an approved quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub document_number: String,
    pub quote_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub description: String,
    pub final_amount: Decimal,
    pub status: OrderStatus,
    pub paid: bool,
    /// Delivery date exactly as the caller supplied it.
    pub delivery_date: String,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
}

/// Order draft. Orders are only ever created by quote approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub document_number: String,
    pub quote_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub description: String,
    pub final_amount: Decimal,
    pub delivery_date: String,
    pub approved_at: DateTime<Utc>,
}

impl NewOrder {
    /// Build the stored record: in production and unpaid.
    pub fn into_order(self, id: String) -> Order {
        Order {
            id,
            document_number: self.document_number,
            quote_id: self.quote_id,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            description: self.description,
            final_amount: self.final_amount,
            status: OrderStatus::Production,
            paid: false,
            delivery_date: self.delivery_date,
            approved_at: Some(self.approved_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_moves_forward_only() {
        use OrderStatus::*;
        assert!(Production.can_advance_to(Installation));
        assert!(Production.can_advance_to(Completed));
        assert!(Installation.can_advance_to(Installation));
        assert!(!Installation.can_advance_to(Production));
        assert!(!Completed.can_advance_to(Installation));
    }

    #[test]
    fn test_new_order_starts_in_production_unpaid() {
        let order = NewOrder {
            document_number: "PED-4821".to_string(),
            quote_id: "o1".to_string(),
            customer_id: "1".to_string(),
            customer_name: "João Silva".to_string(),
            description: "Bancada".to_string(),
            final_amount: Decimal::new(350000, 2),
            delivery_date: "2024-01-15".to_string(),
            approved_at: Utc::now(),
        }
        .into_order("p1".to_string());

        assert_eq!(order.status, OrderStatus::Production);
        assert!(!order.paid);
        assert!(order.status.is_open());
    }
}

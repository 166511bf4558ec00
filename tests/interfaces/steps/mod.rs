//! Cucumber step definitions for interface tests.

pub mod approval;
pub mod orders;

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use cucumber::World;
use rust_decimal::Decimal;

use rochedo::config::StorageMode;
use rochedo::model::{LedgerEntry, NewQuote, Order};
use rochedo::repository::ShopRepository;

use crate::backend::{mode_from_env, StorageContext};

/// Test context shared by the shop scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct ShopWorld {
    mode: StorageMode,
    context: Option<StorageContext>,
    /// Scenario quote names to stored quote ids.
    quotes: HashMap<String, String>,
    last_order_id: Option<String>,
    last_error: Option<String>,
}

impl ShopWorld {
    fn new() -> Self {
        Self {
            mode: mode_from_env(),
            context: None,
            quotes: HashMap::new(),
            last_order_id: None,
            last_error: None,
        }
    }

    fn repository(&self) -> Arc<ShopRepository> {
        self.context
            .as_ref()
            .expect("Storage context not initialized")
            .repository
            .clone()
    }

    fn quote_id(&self, name: &str) -> String {
        self.quotes
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("Unknown quote {}", name))
    }

    async fn add_pending_quote(&mut self, name: &str, customer: &str, amount: &str) {
        let id = self
            .repository()
            .add_quote(NewQuote {
                customer_id: "1".to_string(),
                customer_name: customer.to_string(),
                description: "Bancada de cozinha".to_string(),
                material: "Granito Preto São Gabriel".to_string(),
                area: Decimal::new(35, 1),
                amount: parse_amount(amount),
            })
            .await
            .expect("add quote should succeed");
        self.quotes.insert(name.to_string(), id);
    }

    async fn orders_for(&self, name: &str) -> Vec<Order> {
        let quote_id = self.quote_id(name);
        self.repository()
            .list_orders()
            .await
            .expect("list orders should succeed")
            .into_iter()
            .filter(|o| o.quote_id == quote_id)
            .collect()
    }

    async fn entries_for_order(&self, order_id: &str) -> Vec<LedgerEntry> {
        self.repository()
            .list_entries()
            .await
            .expect("list entries should succeed")
            .into_iter()
            .filter(|e| e.reference_id.as_deref() == Some(order_id))
            .collect()
    }
}

fn parse_amount(raw: &str) -> Decimal {
    Decimal::from_str(raw).unwrap_or_else(|e| panic!("Bad amount {}: {}", raw, e))
}

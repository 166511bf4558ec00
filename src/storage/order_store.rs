//! OrderStore trait definition.

use async_trait::async_trait;

use super::Result;
use crate::model::{Order, OrderStatus};

/// Primary persistence for orders.
///
/// There is no insert here: orders are only created by `ApprovalStore`.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn list_orders(&self) -> Result<Vec<Order>>;

    /// Whether any order references `quote_id`.
    async fn order_exists_for_quote(&self, quote_id: &str) -> Result<bool>;

    /// Move an order to `status`. Backward moves fail with a validation error.
    async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<()>;

    async fn update_order_payment(&self, id: &str, paid: bool) -> Result<()>;
}

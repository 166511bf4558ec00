//! ApprovalStore trait definition.

use async_trait::async_trait;

use super::Result;
use crate::model::ApprovalPlan;

/// The multi-record atomic write behind quote approval.
#[async_trait]
pub trait ApprovalStore: Send + Sync {
    /// Apply `plan` as a single unit of work.
    ///
    /// Marks the quote approved, inserts the order, and inserts the ledger
    /// entry linked to the new order id. Either all three writes commit or
    /// none do. Returns the id assigned to the order.
    ///
    /// Fails with `StorageError::NotFound` (and writes nothing) when the
    /// quote does not exist.
    async fn commit_approval(&self, plan: &ApprovalPlan) -> Result<String>;
}

//! Workflows built on the shop repository.

pub mod approval;
pub mod dashboard;

pub use approval::{ApprovalError, ApprovalService};
pub use dashboard::{DashboardStats, LedgerTotals};

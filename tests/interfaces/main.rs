//! Interface tests for the shop workflows using Cucumber.
//!
//! These tests verify that both storage modes honour the same contract.
//! Select a mode via environment variable:
//!
//! ```bash
//! # Primary store (default, in-memory SQLite)
//! cargo test --test interfaces
//!
//! # Local mirror (JSON files in a temp dir)
//! STORAGE_MODE=local cargo test --test interfaces
//! ```

mod backend;
mod steps;

use cucumber::World;
use steps::ShopWorld;

#[tokio::main]
async fn main() {
    println!("\n=== Running Quote Approval Interface Tests ===\n");
    ShopWorld::cucumber()
        .fail_on_skipped()
        .run("tests/interfaces/features/approval.feature")
        .await;

    println!("\n=== Running Order Lifecycle Interface Tests ===\n");
    ShopWorld::cucumber()
        .fail_on_skipped()
        .run("tests/interfaces/features/orders.feature")
        .await;
}

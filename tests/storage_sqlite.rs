//! SQLite storage integration tests.
//!
//! Run with: cargo test --test storage_sqlite --features sqlite
//!
//! Uses in-memory database by default, no external dependencies required.

mod storage;

use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;

use rochedo::config::StorageMode;
use rochedo::repository::ShopRepository;
use rochedo::storage::local::{LocalCollections, MemoryLocalStorage};
use rochedo::storage::SqliteStore;

/// Get SQLite connection string (in-memory for tests)
fn sqlite_uri() -> String {
    std::env::var("SQLITE_URI").unwrap_or_else(|_| "sqlite::memory:".to_string())
}

/// Fresh primary-mode repository over an empty SQLite database.
async fn fresh_repository() -> ShopRepository {
    // One connection: each in-memory connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&sqlite_uri())
        .await
        .expect("Failed to connect to SQLite");
    let store = SqliteStore::new(pool);
    store.init().await.expect("Failed to create tables");

    let local = LocalCollections::new(Arc::new(MemoryLocalStorage::new()));
    ShopRepository::new(Arc::new(store), local, StorageMode::Primary)
}

#[tokio::test]
async fn test_sqlite_shop_contract() {
    println!("=== SQLite shop repository Tests ===");
    println!("Connecting to: {}", sqlite_uri());

    run_shop_contract_tests!(fresh_repository);

    println!("=== All SQLite shop repository tests PASSED ===");
}

#[tokio::test]
async fn test_sqlite_writes_leave_local_mirror_untouched() {
    let repository = fresh_repository().await;

    repository
        .add_quote(storage::shop_contract_tests::make_quote(rust_decimal::Decimal::TEN))
        .await
        .unwrap();

    assert_eq!(repository.list_quotes().await.unwrap().len(), 1);
    assert!(repository.local().list_quotes().unwrap().is_empty());
}

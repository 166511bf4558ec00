//! Shop repository contract tests.
//!
//! These tests verify the behaviour every store must share, whether the
//! repository routes to the primary store or to the local mirror.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;

use rochedo::model::{
    CustomerUpdate, EntryType, NewCustomer, NewLedgerEntry, NewQuote, OrderStatus, QuoteStatus,
    QuoteUpdate,
};
use rochedo::repository::ShopRepository;
use rochedo::services::{ApprovalError, ApprovalService};
use rochedo::storage::StorageError;

/// Draft quote for the demo customer.
pub fn make_quote(amount: Decimal) -> NewQuote {
    NewQuote {
        customer_id: "1".to_string(),
        customer_name: "João Silva".to_string(),
        description: "Bancada de cozinha".to_string(),
        material: "Granito Preto São Gabriel".to_string(),
        area: Decimal::new(35, 1),
        amount,
    }
}

pub fn make_entry(description: &str, day: u32, entry_type: EntryType) -> NewLedgerEntry {
    NewLedgerEntry {
        description: description.to_string(),
        amount: Decimal::new(10000, 2),
        date: chrono::NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        entry_type,
        category: "Stock".to_string(),
        paid: false,
        reference_id: None,
    }
}

// =============================================================================
// Customers
// =============================================================================

pub async fn test_customer_crud(repo: &ShopRepository) {
    let id = repo
        .add_customer(NewCustomer {
            name: "Maria Oliveira".to_string(),
            email: "maria@email.com".to_string(),
            ..Default::default()
        })
        .await
        .expect("add should succeed");

    repo.update_customer(
        &id,
        CustomerUpdate {
            phone: Some("(11) 88888-8888".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("update should succeed");

    let customers = repo.list_customers().await.expect("list should succeed");
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].phone, "(11) 88888-8888");
    assert_eq!(customers[0].email, "maria@email.com");

    repo.delete_customer(&id).await.expect("delete should succeed");
    assert!(repo.list_customers().await.unwrap().is_empty());
}

pub async fn test_blank_customer_name_rejected(repo: &ShopRepository) {
    let result = repo.add_customer(NewCustomer::default()).await;
    assert!(matches!(result, Err(StorageError::Validation(_))));
}

pub async fn test_update_missing_customer_not_found(repo: &ShopRepository) {
    let result = repo
        .update_customer("missing", CustomerUpdate::default())
        .await;
    assert!(matches!(result, Err(StorageError::NotFound { .. })));
}

// =============================================================================
// Quotes
// =============================================================================

pub async fn test_quote_created_pending(repo: &ShopRepository) {
    let id = repo.add_quote(make_quote(Decimal::TEN)).await.unwrap();

    let quote = repo.get_quote(&id).await.unwrap().expect("quote exists");
    assert_eq!(quote.status, QuoteStatus::Pending);
    assert!(quote.document_number.starts_with("ORC-"));
    assert_eq!(quote.amount, Decimal::TEN);
    assert_eq!(quote.area, Decimal::new(35, 1));
}

pub async fn test_quotes_newest_first(repo: &ShopRepository) {
    let first = repo.add_quote(make_quote(Decimal::ONE)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = repo.add_quote(make_quote(Decimal::TWO)).await.unwrap();

    let quotes = repo.list_quotes().await.unwrap();
    let ids: Vec<_> = quotes.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);
}

pub async fn test_update_cannot_approve_quote(repo: &ShopRepository) {
    let id = repo.add_quote(make_quote(Decimal::TEN)).await.unwrap();

    let result = repo
        .update_quote(
            &id,
            QuoteUpdate {
                status: Some(QuoteStatus::Approved),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(StorageError::Validation(_))));
    let quote = repo.get_quote(&id).await.unwrap().unwrap();
    assert_eq!(quote.status, QuoteStatus::Pending);
}

// =============================================================================
// Approval
// =============================================================================

pub async fn test_approval_writes_order_and_income(repo: &ShopRepository) {
    let service = ApprovalService::new(Arc::new(repo.clone()));
    let id = repo
        .add_quote(make_quote(Decimal::new(350000, 2)))
        .await
        .unwrap();
    let quote = repo.get_quote(&id).await.unwrap().unwrap();

    let order_id = service
        .approve(&quote, "2024-01-15")
        .await
        .expect("approve should succeed");

    let orders = repo.list_orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, order_id);
    assert_eq!(orders[0].status, OrderStatus::Production);
    assert_eq!(orders[0].delivery_date, "2024-01-15");
    assert!(!orders[0].paid);

    let entries = repo.list_entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].amount, Decimal::new(350000, 2));
    assert_eq!(entries[0].entry_type, EntryType::Income);
    assert_eq!(entries[0].date, Utc::now().date_naive());
    assert_eq!(entries[0].reference_id.as_deref(), Some(order_id.as_str()));

    let quote = repo.get_quote(&id).await.unwrap().unwrap();
    assert_eq!(quote.status, QuoteStatus::Approved);
}

pub async fn test_second_approval_is_duplicate(repo: &ShopRepository) {
    let service = ApprovalService::new(Arc::new(repo.clone()));
    let id = repo
        .add_quote(make_quote(Decimal::new(350000, 2)))
        .await
        .unwrap();

    service.approve_by_id(&id, "2024-01-15").await.unwrap();
    let second = service.approve_by_id(&id, "2024-02-01").await;

    assert!(matches!(
        second,
        Err(ApprovalError::DuplicateConversion { .. })
    ));
    assert_eq!(repo.list_orders().await.unwrap().len(), 1);
    assert_eq!(repo.list_entries().await.unwrap().len(), 1);
}

pub async fn test_zero_amount_approval(repo: &ShopRepository) {
    let service = ApprovalService::new(Arc::new(repo.clone()));
    let id = repo.add_quote(make_quote(Decimal::ZERO)).await.unwrap();

    service.approve_by_id(&id, "2024-01-15").await.unwrap();

    let entries = repo.list_entries().await.unwrap();
    assert_eq!(entries[0].amount, Decimal::ZERO);
}

// =============================================================================
// Orders
// =============================================================================

pub async fn test_order_status_moves_forward_only(repo: &ShopRepository) {
    let service = ApprovalService::new(Arc::new(repo.clone()));
    let id = repo.add_quote(make_quote(Decimal::TEN)).await.unwrap();
    let order_id = service.approve_by_id(&id, "2024-01-15").await.unwrap();

    repo.update_order_status(&order_id, OrderStatus::Installation)
        .await
        .expect("forward move should succeed");
    let back = repo
        .update_order_status(&order_id, OrderStatus::Production)
        .await;
    assert!(matches!(back, Err(StorageError::Validation(_))));

    repo.update_order_payment(&order_id, true).await.unwrap();
    let orders = repo.list_orders().await.unwrap();
    assert_eq!(orders[0].status, OrderStatus::Installation);
    assert!(orders[0].paid);
}

pub async fn test_update_missing_order_not_found(repo: &ShopRepository) {
    let result = repo.update_order_payment("missing", true).await;
    assert!(matches!(result, Err(StorageError::NotFound { .. })));
}

// =============================================================================
// Ledger
// =============================================================================

pub async fn test_ledger_newest_date_first_and_toggle(repo: &ShopRepository) {
    repo.add_entry(make_entry("Chapas", 5, EntryType::Expense))
        .await
        .unwrap();
    let later = repo
        .add_entry(make_entry("Cola", 20, EntryType::Expense))
        .await
        .unwrap();

    let entries = repo.list_entries().await.unwrap();
    assert_eq!(entries[0].id, later);
    assert_eq!(entries[1].description, "Chapas");

    assert!(repo.toggle_entry_paid(&later).await.unwrap());
    let entries = repo.list_entries().await.unwrap();
    assert!(entries[0].paid);
    assert!(!entries[1].paid);
}

pub async fn test_negative_entry_rejected(repo: &ShopRepository) {
    let mut entry = make_entry("Estorno", 1, EntryType::Expense);
    entry.amount = Decimal::new(-1, 0);
    let result = repo.add_entry(entry).await;
    assert!(matches!(result, Err(StorageError::Validation(_))));
}

/// Run every contract test, each against a fresh repository from `$make`.
#[macro_export]
macro_rules! run_shop_contract_tests {
    ($make:expr) => {
        use $crate::storage::shop_contract_tests::*;

        test_customer_crud(&$make().await).await;
        println!("  test_customer_crud: PASSED");

        test_blank_customer_name_rejected(&$make().await).await;
        println!("  test_blank_customer_name_rejected: PASSED");

        test_update_missing_customer_not_found(&$make().await).await;
        println!("  test_update_missing_customer_not_found: PASSED");

        test_quote_created_pending(&$make().await).await;
        println!("  test_quote_created_pending: PASSED");

        test_quotes_newest_first(&$make().await).await;
        println!("  test_quotes_newest_first: PASSED");

        test_update_cannot_approve_quote(&$make().await).await;
        println!("  test_update_cannot_approve_quote: PASSED");

        test_approval_writes_order_and_income(&$make().await).await;
        println!("  test_approval_writes_order_and_income: PASSED");

        test_second_approval_is_duplicate(&$make().await).await;
        println!("  test_second_approval_is_duplicate: PASSED");

        test_zero_amount_approval(&$make().await).await;
        println!("  test_zero_amount_approval: PASSED");

        test_order_status_moves_forward_only(&$make().await).await;
        println!("  test_order_status_moves_forward_only: PASSED");

        test_update_missing_order_not_found(&$make().await).await;
        println!("  test_update_missing_order_not_found: PASSED");

        test_ledger_newest_date_first_and_toggle(&$make().await).await;
        println!("  test_ledger_newest_date_first_and_toggle: PASSED");

        test_negative_entry_rejected(&$make().await).await;
        println!("  test_negative_entry_rejected: PASSED");
    };
}

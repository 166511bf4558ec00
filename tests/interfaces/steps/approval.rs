//! Quote approval step definitions.

use cucumber::{given, then, when};
use rochedo::model::{EntryType, OrderStatus, QuoteStatus};
use rochedo::services::ApprovalService;

use super::{parse_amount, ShopWorld};
use crate::backend::StorageContext;

// --- Background ---

#[given("a shop repository")]
async fn given_shop_repository(world: &mut ShopWorld) {
    println!("Using storage mode: {}", world.mode);
    world.context = Some(StorageContext::new(world.mode).await);
}

// --- Given steps ---

#[given(expr = "a pending quote {string} for {string} worth {string}")]
async fn given_pending_quote(world: &mut ShopWorld, name: String, customer: String, amount: String) {
    world.add_pending_quote(&name, &customer, &amount).await;
}

// --- When steps ---

#[when(expr = "I approve quote {string} for delivery on {string}")]
async fn when_approve(world: &mut ShopWorld, name: String, delivery_date: String) {
    let repository = world.repository();
    let quote = repository
        .get_quote(&world.quote_id(&name))
        .await
        .expect("get quote should succeed")
        .expect("quote should exist");

    match ApprovalService::new(repository).approve(&quote, &delivery_date).await {
        Ok(order_id) => {
            world.last_order_id = Some(order_id);
            world.last_error = None;
        }
        Err(e) => world.last_error = Some(e.user_message().to_string()),
    }
}

// --- Then steps ---

#[then("the approval succeeds")]
async fn then_approval_succeeds(world: &mut ShopWorld) {
    assert!(
        world.last_error.is_none(),
        "approval failed: {:?}",
        world.last_error
    );
    assert!(world.last_order_id.is_some());
}

#[then(expr = "the approval fails with {string}")]
async fn then_approval_fails_with(world: &mut ShopWorld, message: String) {
    assert_eq!(world.last_error.as_deref(), Some(message.as_str()));
}

#[then(expr = "quote {string} is {string}")]
async fn then_quote_status(world: &mut ShopWorld, name: String, status: String) {
    let expected: QuoteStatus = status.parse().expect("known quote status");
    let quote = world
        .repository()
        .get_quote(&world.quote_id(&name))
        .await
        .expect("get quote should succeed")
        .expect("quote should exist");
    assert_eq!(quote.status, expected);
}

#[then(expr = "there is {int} order for quote {string}")]
async fn then_order_count(world: &mut ShopWorld, count: usize, name: String) {
    assert_eq!(world.orders_for(&name).await.len(), count);
}

#[then(expr = "the order for quote {string} is in production, unpaid, due {string}")]
async fn then_new_order_state(world: &mut ShopWorld, name: String, delivery_date: String) {
    let orders = world.orders_for(&name).await;
    let order = orders.first().expect("order should exist");
    assert_eq!(order.status, OrderStatus::Production);
    assert!(!order.paid);
    assert_eq!(order.delivery_date, delivery_date);
    assert!(order.document_number.starts_with("PED-"));
}

#[then(expr = "the order for quote {string} has one unpaid sale entry worth {string}")]
async fn then_sale_entry(world: &mut ShopWorld, name: String, amount: String) {
    let orders = world.orders_for(&name).await;
    let order = orders.first().expect("order should exist");
    let entries = world.entries_for_order(&order.id).await;

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.amount, parse_amount(&amount));
    assert_eq!(entry.entry_type, EntryType::Income);
    assert_eq!(entry.category, "Sale");
    assert!(!entry.paid);
    assert_eq!(
        entry.description,
        format!("Order {} - {}", order.document_number, order.customer_name)
    );
}

#[then(expr = "the ledger holds {int} entries")]
async fn then_ledger_size(world: &mut ShopWorld, count: usize) {
    let entries = world
        .repository()
        .list_entries()
        .await
        .expect("list entries should succeed");
    assert_eq!(entries.len(), count);
}

//! Order lifecycle step definitions.

use cucumber::{given, then, when};
use rochedo::model::OrderStatus;
use rochedo::services::ApprovalService;

use super::ShopWorld;

// --- Given steps ---

#[given(expr = "an approved quote {string} worth {string}")]
async fn given_approved_quote(world: &mut ShopWorld, name: String, amount: String) {
    world.add_pending_quote(&name, "Maria Oliveira", &amount).await;
    let order_id = ApprovalService::new(world.repository())
        .approve_by_id(&world.quote_id(&name), "2024-01-20")
        .await
        .expect("approval should succeed");
    world.last_order_id = Some(order_id);
}

// --- When steps ---

#[when(expr = "I move the order for quote {string} to {string}")]
async fn when_move_order(world: &mut ShopWorld, name: String, status: String) {
    let status: OrderStatus = status.parse().expect("known order status");
    let order_id = world.orders_for(&name).await[0].id.clone();
    world.last_error = world
        .repository()
        .update_order_status(&order_id, status)
        .await
        .err()
        .map(|e| e.to_string());
}

#[when(expr = "I toggle the paid flag of the sale entry for quote {string}")]
async fn when_toggle_sale_entry(world: &mut ShopWorld, name: String) {
    let order_id = world.orders_for(&name).await[0].id.clone();
    let entry_id = world.entries_for_order(&order_id).await[0].id.clone();
    world
        .repository()
        .toggle_entry_paid(&entry_id)
        .await
        .expect("toggle should succeed");
}

// --- Then steps ---

#[then("the move succeeds")]
async fn then_move_succeeds(world: &mut ShopWorld) {
    assert!(world.last_error.is_none(), "move failed: {:?}", world.last_error);
}

#[then("the move is refused")]
async fn then_move_refused(world: &mut ShopWorld) {
    assert!(world.last_error.is_some(), "backward move was accepted");
}

#[then(expr = "the order for quote {string} is {string}")]
async fn then_order_status(world: &mut ShopWorld, name: String, status: String) {
    let expected: OrderStatus = status.parse().expect("known order status");
    assert_eq!(world.orders_for(&name).await[0].status, expected);
}

#[then(expr = "the sale entry for quote {string} is paid")]
async fn then_sale_entry_paid(world: &mut ShopWorld, name: String) {
    let order_id = world.orders_for(&name).await[0].id.clone();
    assert!(world.entries_for_order(&order_id).await[0].paid);
}

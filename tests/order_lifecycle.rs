//! Integration test for the full cart to order lifecycle.
//!
//! A customer fills a cart, checks out, the kitchen moves the order through its statuses and the
//! customer later reorders it from history:
//!
//! 1. Cart: 2 x Soy Milk at 2.00 and 1 x Egg Crepe at 3.50, total 7.50
//! 2. Checkout with `MASTERCARD`: order is `PENDING`, cart is emptied
//! 3. `PENDING` -> `CONFIRMED` -> `READY` -> `DELIVERED`
//! 4. Reorder into an empty cart: same lines, same 7.50 total

use rusty_money::{Money, iso};
use testresult::TestResult;

use morsel::prelude::*;

fn line(id: &str, name: &str, price: &str, quantity: u32) -> TestResult<LineItem> {
    Ok(LineItem::new(
        ProductId::new(id)?,
        name,
        parse_amount(price, iso::USD)?,
        quantity,
    ))
}

#[tokio::test]
async fn cart_checkout_status_and_reorder() -> TestResult {
    let service = StoreOrdersService::new(
        InMemoryOrdersRepository::new(),
        OrderBuilder::new(iso::USD),
    );

    let mut cart = Cart::new(iso::USD);

    cart.add_item(line("soy-milk", "Soy Milk", "2.00", 1)?)?;
    cart.add_item(line("egg-crepe", "Egg Crepe", "3.50", 1)?)?;
    cart.add_item(line("soy-milk", "Soy Milk", "9.99", 1)?)?;

    assert_eq!(format_amount(&cart.total_price()?), "7.50");

    let order = service
        .builder()
        .checkout(service.repository(), &mut cart, "MASTERCARD", None)
        .await?;

    assert!(cart.is_empty());
    assert_eq!(format_amount(&order.total), "7.50");
    assert_eq!(order.subtotal, order.total);
    assert_eq!(order.status, OrderStatus::Pending);
    assert!((15..=20).contains(&order.estimated_time_minutes));

    for status in ["CONFIRMED", "READY", "DELIVERED"] {
        service.update_status(order.uuid, status.to_string()).await?;
    }

    let delivered = service.get_order(order.uuid).await?;

    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert_eq!(delivered.total, order.total);

    let cancelled = service
        .update_status(order.uuid, "CANCELLED".to_string())
        .await;

    assert!(matches!(
        cancelled,
        Err(OrderError::IllegalTransition { .. })
    ));

    cart.replace_items(service.reorder(order.uuid).await?)?;

    assert_eq!(cart.total_price()?, Money::from_minor(750, iso::USD));
    assert_eq!(cart.total_items(), 3);

    Ok(())
}

#[tokio::test]
async fn failed_checkout_keeps_cart_and_stores_nothing() -> TestResult {
    let repository = InMemoryOrdersRepository::new();
    let builder = OrderBuilder::new(iso::USD);

    let mut cart = Cart::new(iso::USD);

    cart.add_item(line("radish-cake", "Radish Cake", "3.25", 2)?)?;

    let result = builder
        .checkout(&repository, &mut cart, "CASH", None)
        .await;

    assert!(matches!(result, Err(OrderError::InvalidPaymentMethod(_))));
    assert_eq!(cart.total_items(), 2);
    assert!(repository.list_recent_orders(50).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn user_history_is_newest_first() -> TestResult {
    let service = StoreOrdersService::new(
        InMemoryOrdersRepository::new(),
        OrderBuilder::new(iso::USD),
    );

    let user = UserId::new("customer-1")?;

    let mut placed = Vec::new();

    for price in ["1.00", "2.00", "3.00"] {
        let order = service
            .create_order(NewOrderRequest {
                items: vec![line("tea", "Black Tea", price, 1)?],
                payment_method: "VISA".to_string(),
                user_id: Some(user.clone()),
            })
            .await?;

        placed.push(order.uuid);
    }

    let history = service.list_user_orders(user).await?;

    let uuids: Vec<OrderUuid> = history.iter().map(|order| order.uuid).collect();

    placed.reverse();

    assert_eq!(uuids, placed);

    Ok(())
}

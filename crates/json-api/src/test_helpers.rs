//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rusty_money::{Money, iso};
use salvo::{affix_state::inject, prelude::*};
use testresult::TestResult;

use morsel::{
    orders::{MockOrdersService, Order, OrderItem, OrderNumber, OrderStatus, PaymentMethod},
    products::ProductId,
    uuids::TypedUuid,
};
use morsel_app::context::AppContext;

use crate::state::State;

fn make_item(id: &str, name: &str, price: i64, quantity: u32) -> TestResult<OrderItem> {
    Ok(OrderItem {
        uuid: TypedUuid::new(),
        product_id: ProductId::new(id)?,
        product_name: name.to_string(),
        quantity,
        price: Money::from_minor(price, iso::USD),
        subtotal: Money::from_minor(price * i64::from(quantity), iso::USD),
        created_at: Timestamp::UNIX_EPOCH,
    })
}

/// A pending Mastercard order for two soy milks and a bagel, `7.50` in total.
pub(crate) fn make_order() -> TestResult<Order> {
    Ok(Order {
        uuid: TypedUuid::new(),
        order_number: OrderNumber::from_bits(42),
        items: vec![
            make_item("soy-milk", "Soy Milk", 200, 2)?,
            make_item("bagel", "Bagel", 350, 1)?,
        ],
        subtotal: Money::from_minor(750, iso::USD),
        total: Money::from_minor(750, iso::USD),
        status: OrderStatus::Pending,
        payment_method: PaymentMethod::Mastercard,
        estimated_time_minutes: 15,
        user_id: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    })
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    State::from_app_context(
        AppContext {
            orders: Arc::new(orders),
        },
        iso::USD,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_orders(orders)))
            .push(route),
    )
}

//! Orders Data

use crate::{
    cart::LineItem,
    money::Amount,
    orders::{
        OrderNumber, OrderStatus, PaymentMethod,
        records::{OrderItemUuid, OrderUuid, UserId},
    },
    products::ProductId,
};

/// New Order Data
///
/// Everything the builder computed for an order; the repository only adds timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub order_number: OrderNumber,
    pub items: Vec<NewOrderItem>,
    pub subtotal: Amount,
    pub total: Amount,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub estimated_time_minutes: u32,
    pub user_id: Option<UserId>,
}

/// New Order Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub price: Amount,
    pub subtotal: Amount,
}

/// A request to place an order from a cart snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderRequest {
    pub items: Vec<LineItem>,

    /// Raw payment method label, validated when the order is built.
    pub payment_method: String,
    pub user_id: Option<UserId>,
}

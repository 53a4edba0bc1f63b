//! Order Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rusty_money::iso::Currency;

use crate::{
    money::Amount,
    orders::{OrderError, OrderNumber, OrderStatus, PaymentMethod},
    products::ProductId,
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// Identifier of the customer an order belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Creates a user id, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidUserId`] for blank input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, OrderError> {
        let id = id.as_ref().trim();

        if id.is_empty() {
            return Err(OrderError::InvalidUserId);
        }

        Ok(Self(id.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// A persisted order. Everything but `status` and `updated_at` is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub order_number: OrderNumber,
    pub items: Vec<OrderItem>,
    pub subtotal: Amount,
    pub total: Amount,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub estimated_time_minutes: u32,
    pub user_id: Option<UserId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Currency the order was priced in.
    pub fn currency(&self) -> &'static Currency {
        self.total.currency()
    }

    /// Total number of units across all items.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// One line of a persisted order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,

    /// Unit price captured from the cart.
    pub price: Amount,

    /// `price * quantity`.
    pub subtotal: Amount,
    pub created_at: Timestamp,
}

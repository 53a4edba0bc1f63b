//! Order request and response bodies.
//!
//! Amounts travel as decimal strings in the store currency, never as JSON numbers.

use std::string::ToString;

use rusty_money::iso::Currency;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use morsel::{
    cart::LineItem,
    money::{format_amount, parse_amount},
    orders::{Order, OrderItem, UserId, data::NewOrderRequest},
    products::ProductId,
};

use crate::extensions::*;

/// A cart line submitted with a new order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemRequest {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,

    /// Unit price as decimal text, e.g. `"3.50"`
    pub price: String,
}

impl OrderItemRequest {
    fn into_line_item(self, currency: &'static Currency) -> Result<LineItem, StatusError> {
        let product_id = ProductId::new(&self.product_id).or_400("invalid productId")?;
        let price = parse_amount(&self.price, currency).or_400("invalid price")?;

        Ok(LineItem::new(
            product_id,
            self.product_name,
            price,
            self.quantity,
        ))
    }
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,

    /// One of `CREDIT_CARD`, `MASTERCARD`, `VISA`, `APPLE_PAY`
    pub payment_method: String,

    #[serde(default)]
    pub user_id: Option<String>,
}

impl CreateOrderRequest {
    /// Read prices in `currency` and validate identifiers.
    pub(crate) fn into_new_order_request(
        self,
        currency: &'static Currency,
    ) -> Result<NewOrderRequest, StatusError> {
        let items = self
            .items
            .into_iter()
            .map(|item| item.into_line_item(currency))
            .collect::<Result<Vec<_>, _>>()?;

        let user_id = self
            .user_id
            .map(UserId::new)
            .transpose()
            .or_400("invalid userId")?;

        Ok(NewOrderRequest {
            items,
            payment_method: self.payment_method,
            user_id,
        })
    }
}

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// Target status, e.g. `CONFIRMED`
    pub status: String,
}

/// A line of a placed order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: String,
    pub subtotal: String,
    pub created_at: String,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            id: item.uuid.into_uuid(),
            product_id: item.product_id.to_string(),
            product_name: item.product_name,
            quantity: item.quantity,
            price: format_amount(&item.price),
            subtotal: format_amount(&item.subtotal),
            created_at: item.created_at.to_string(),
        }
    }
}

/// A placed order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub id: Uuid,

    /// Customer-facing reference, e.g. `#0000000042`
    pub order_number: String,
    pub items: Vec<OrderItemResponse>,
    pub subtotal: String,
    pub total: String,

    /// ISO 4217 code of every amount in the order
    pub currency: String,
    pub status: String,
    pub payment_method: String,

    /// Estimated preparation time in minutes
    pub estimated_time: u32,
    pub user_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.uuid.into_uuid(),
            order_number: order.order_number.to_string(),
            subtotal: format_amount(&order.subtotal),
            total: format_amount(&order.total),
            currency: order.currency().iso_alpha_code.to_string(),
            status: order.status.to_string(),
            payment_method: order.payment_method.to_string(),
            estimated_time: order.estimated_time_minutes,
            user_id: order.user_id.as_ref().map(ToString::to_string),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// A cart line rebuilt from a past order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: String,
}

impl From<LineItem> for CartItemResponse {
    fn from(item: LineItem) -> Self {
        CartItemResponse {
            product_id: item.product_id.to_string(),
            price: format_amount(&item.unit_price),
            product_name: item.name,
            quantity: item.quantity,
        }
    }
}

/// Single Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderEnvelope {
    pub success: bool,
    pub order: OrderResponse,
}

impl From<Order> for OrderEnvelope {
    fn from(order: Order) -> Self {
        OrderEnvelope {
            success: true,
            order: order.into(),
        }
    }
}

/// Order Lookup Response
///
/// Carries `order` for a lookup by order number and `orders` for listings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersEnvelope {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderResponse>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<Vec<OrderResponse>>,
}

impl OrdersEnvelope {
    pub(crate) fn single(order: Order) -> Self {
        OrdersEnvelope {
            success: true,
            order: Some(order.into()),
            orders: None,
        }
    }

    pub(crate) fn many(orders: Vec<Order>) -> Self {
        OrdersEnvelope {
            success: true,
            order: None,
            orders: Some(orders.into_iter().map(Into::into).collect()),
        }
    }
}

/// Reorder Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReorderEnvelope {
    pub success: bool,
    pub items: Vec<CartItemResponse>,
}

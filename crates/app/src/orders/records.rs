//! Order Records
//!
//! Row shapes of the `orders` and `order_items` tables. Amounts are stored as minor units next to
//! the order's ISO currency code.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use morsel::{
    money::Amount,
    orders::{
        Order, OrderItem, OrderItemUuid, OrderNumber, OrderStatus, OrderUuid, PaymentMethod,
        UserId,
    },
    products::ProductId,
};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use sqlx::{FromRow, Row, postgres::PgRow};
use uuid::Uuid;

/// Order Record
#[derive(Debug, Clone)]
pub(crate) struct OrderRecord {
    pub uuid: OrderUuid,
    pub order_number: OrderNumber,
    pub subtotal: Amount,
    pub total: Amount,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub estimated_time_minutes: u32,
    pub user_id: Option<UserId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    pub(crate) fn currency(&self) -> &'static Currency {
        self.total.currency()
    }

    pub(crate) fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            uuid: self.uuid,
            order_number: self.order_number,
            items,
            subtotal: self.subtotal,
            total: self.total,
            status: self.status,
            payment_method: self.payment_method,
            estimated_time_minutes: self.estimated_time_minutes,
            user_id: self.user_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Order Item Record
///
/// Prices stay in minor units until the owning order supplies the currency.
#[derive(Debug, Clone)]
pub(crate) struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub price: i64,
    pub subtotal: i64,
    pub created_at: Timestamp,
}

impl OrderItemRecord {
    pub(crate) fn into_item(self, currency: &'static Currency) -> OrderItem {
        OrderItem {
            uuid: self.uuid,
            product_id: self.product_id,
            product_name: self.product_name,
            quantity: self.quantity,
            price: Money::from_minor(self.price, currency),
            subtotal: Money::from_minor(self.subtotal, currency),
            created_at: self.created_at,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let currency_code: String = row.try_get("currency")?;

        let currency = iso::find(&currency_code).ok_or_else(|| {
            decode_error("currency", format!("unknown currency {currency_code:?}"))
        })?;

        let order_number: String = row.try_get("order_number")?;
        let status: String = row.try_get("status")?;
        let payment_method: String = row.try_get("payment_method")?;
        let estimated_time_minutes: i32 = row.try_get("estimated_time_minutes")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: order_number
                .parse()
                .map_err(|e| decode_error("order_number", e))?,
            subtotal: Money::from_minor(row.try_get("subtotal")?, currency),
            total: Money::from_minor(row.try_get("total")?, currency),
            status: status.parse().map_err(|e| decode_error("status", e))?,
            payment_method: payment_method
                .parse()
                .map_err(|e| decode_error("payment_method", e))?,
            estimated_time_minutes: u32::try_from(estimated_time_minutes)
                .map_err(|e| decode_error("estimated_time_minutes", e))?,
            user_id: row
                .try_get::<Option<String>, _>("user_id")?
                .map(UserId::new)
                .transpose()
                .map_err(|e| decode_error("user_id", e))?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i64 = row.try_get("quantity")?;
        let product_id: String = row.try_get("product_id")?;
        let order_uuid: Uuid = row.try_get("order_uuid")?;

        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(order_uuid),
            product_id: ProductId::new(product_id).map_err(|e| decode_error("product_id", e))?,
            product_name: row.try_get("product_name")?,
            quantity: u32::try_from(quantity).map_err(|e| decode_error("quantity", e))?,
            price: row.try_get("price")?,
            subtotal: row.try_get("subtotal")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

fn decode_error(
    column: &str,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: source.into(),
    }
}

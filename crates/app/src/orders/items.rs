//! Order Items Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use morsel::orders::{OrderItem, OrderUuid, data::NewOrderItem};
use sqlx::{Postgres, Transaction, query_as, query_scalar};
use uuid::Uuid;

use super::records::OrderItemRecord;

const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Items of every order in `orders`, grouped by order and in their original line order.
    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[Uuid],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        position: usize,
        item: NewOrderItem,
        created_at: Timestamp,
    ) -> Result<OrderItem, sqlx::Error> {
        let position = i32::try_from(position).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        let created_at: SqlxTimestamp = query_scalar(CREATE_ORDER_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(order.into_uuid())
            .bind(position)
            .bind(item.product_id.as_str())
            .bind(&item.product_name)
            .bind(i64::from(item.quantity))
            .bind(item.price.to_minor_units())
            .bind(item.subtotal.to_minor_units())
            .bind(SqlxTimestamp::from(created_at))
            .fetch_one(&mut **tx)
            .await?;

        Ok(OrderItem {
            uuid: item.uuid,
            product_id: item.product_id,
            product_name: item.product_name,
            quantity: item.quantity,
            price: item.price,
            subtotal: item.subtotal,
            created_at: created_at.to_jiff(),
        })
    }
}

//! Orders Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use morsel::{
    orders::{Order, OrderNumber, OrderStatus, OrderUuid, UserId, data::NewOrder},
    repository::{OrdersRepository, RepositoryError},
};
use rustc_hash::FxHashMap;
use sqlx::{PgPool, Postgres, Transaction, query_as, query_scalar};
use tracing::debug;
use uuid::Uuid;

use super::{
    errors::repository_error,
    items::PgOrderItemsRepository,
    records::{OrderItemRecord, OrderRecord},
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const FIND_ORDER_BY_ID_SQL: &str = include_str!("sql/find_order_by_id.sql");
const FIND_ORDER_BY_NUMBER_SQL: &str = include_str!("sql/find_order_by_number.sql");
const FIND_ORDERS_BY_USER_SQL: &str = include_str!("sql/find_orders_by_user.sql");
const LIST_RECENT_ORDERS_SQL: &str = include_str!("sql/list_recent_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const FIND_ORDER_STATUS_SQL: &str = include_str!("sql/find_order_status.sql");

/// `PostgreSQL` order store. Each call runs in its own transaction.
#[derive(Debug, Clone)]
pub struct PgOrdersRepository {
    pool: PgPool,
    items: PgOrderItemsRepository,
}

impl PgOrdersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            items: PgOrderItemsRepository::new(),
        }
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, sqlx::Error> {
        let estimated_time_minutes = i32::try_from(order.estimated_time_minutes)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        let mut tx = self.pool.begin().await?;

        let (created_at, updated_at): (SqlxTimestamp, SqlxTimestamp) =
            query_as(CREATE_ORDER_SQL)
                .bind(order.uuid.into_uuid())
                .bind(order.order_number.as_str())
                .bind(order.total.currency().iso_alpha_code)
                .bind(order.subtotal.to_minor_units())
                .bind(order.total.to_minor_units())
                .bind(order.status.as_str())
                .bind(order.payment_method.as_str())
                .bind(estimated_time_minutes)
                .bind(order.user_id.as_ref().map(UserId::as_str))
                .fetch_one(&mut *tx)
                .await?;

        let created_at = created_at.to_jiff();

        let mut items = Vec::with_capacity(order.items.len());

        for (position, item) in order.items.into_iter().enumerate() {
            let item = self
                .items
                .create_order_item(&mut tx, order.uuid, position, item, created_at)
                .await?;

            items.push(item);
        }

        tx.commit().await?;

        debug!(order = %order.uuid, items = items.len(), "order committed");

        Ok(Order {
            uuid: order.uuid,
            order_number: order.order_number,
            items,
            subtotal: order.subtotal,
            total: order.total,
            status: order.status,
            payment_method: order.payment_method,
            estimated_time_minutes: order.estimated_time_minutes,
            user_id: order.user_id,
            created_at,
            updated_at: updated_at.to_jiff(),
        })
    }

    /// Load the items of `records` and assemble full orders, keeping the record order.
    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        records: Vec<OrderRecord>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = records.iter().map(|record| record.uuid.into_uuid()).collect();

        let mut items_by_order: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for item in self.items.get_order_items(tx, &uuids).await? {
            items_by_order.entry(item.order_uuid).or_default().push(item);
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let currency = record.currency();

                let items = items_by_order
                    .remove(&record.uuid)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|item| item.into_item(currency))
                    .collect();

                record.into_order(items)
            })
            .collect())
    }
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn create_order(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        self.insert_order(order).await.map_err(repository_error)
    }

    async fn find_order_by_id(&self, order: OrderUuid) -> Result<Option<Order>, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(repository_error)?;

        let record = query_as::<Postgres, OrderRecord>(FIND_ORDER_BY_ID_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(repository_error)?;

        let order = self
            .attach_items(&mut tx, record.into_iter().collect())
            .await
            .map_err(repository_error)?
            .pop();

        tx.commit().await.map_err(repository_error)?;

        Ok(order)
    }

    async fn find_order_by_number(
        &self,
        number: OrderNumber,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(repository_error)?;

        let record = query_as::<Postgres, OrderRecord>(FIND_ORDER_BY_NUMBER_SQL)
            .bind(number.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(repository_error)?;

        let order = self
            .attach_items(&mut tx, record.into_iter().collect())
            .await
            .map_err(repository_error)?
            .pop();

        tx.commit().await.map_err(repository_error)?;

        Ok(order)
    }

    async fn find_orders_by_user(&self, user: UserId) -> Result<Vec<Order>, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(repository_error)?;

        let records = query_as::<Postgres, OrderRecord>(FIND_ORDERS_BY_USER_SQL)
            .bind(user.as_str())
            .fetch_all(&mut *tx)
            .await
            .map_err(repository_error)?;

        let orders = self
            .attach_items(&mut tx, records)
            .await
            .map_err(repository_error)?;

        tx.commit().await.map_err(repository_error)?;

        Ok(orders)
    }

    async fn list_recent_orders(&self, limit: u32) -> Result<Vec<Order>, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(repository_error)?;

        let records = query_as::<Postgres, OrderRecord>(LIST_RECENT_ORDERS_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut *tx)
            .await
            .map_err(repository_error)?;

        let orders = self
            .attach_items(&mut tx, records)
            .await
            .map_err(repository_error)?;

        tx.commit().await.map_err(repository_error)?;

        Ok(orders)
    }

    async fn update_order_status(
        &self,
        order: OrderUuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(repository_error)?;

        let record = query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(repository_error)?;

        let Some(record) = record else {
            let stored: Option<String> = query_scalar(FIND_ORDER_STATUS_SQL)
                .bind(order.into_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(repository_error)?;

            tx.rollback().await.map_err(repository_error)?;

            let stored = stored
                .ok_or(RepositoryError::NotFound)?
                .parse::<OrderStatus>()
                .map_err(|e| RepositoryError::Storage(Box::new(e)))?;

            debug!(%order, expected = %from, %stored, "status write lost to a concurrent update");

            return Err(RepositoryError::StatusChanged(stored));
        };

        let updated = self
            .attach_items(&mut tx, vec![record])
            .await
            .map_err(repository_error)?
            .pop()
            .ok_or(RepositoryError::NotFound)?;

        tx.commit().await.map_err(repository_error)?;

        Ok(updated)
    }
}

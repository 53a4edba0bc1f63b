//! In-memory Orders Repository

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    orders::{
        Order, OrderItem, OrderNumber, OrderStatus, OrderUuid, UserId,
        data::{NewOrder, NewOrderItem},
    },
    repository::{OrdersRepository, RepositoryError},
};

#[derive(Debug, Default)]
struct MemoryState {
    orders: FxHashMap<OrderUuid, Order>,
    by_number: FxHashMap<OrderNumber, OrderUuid>,

    /// Insertion order, oldest first.
    sequence: Vec<OrderUuid>,
}

impl MemoryState {
    fn newest_first(&self) -> impl Iterator<Item = &Order> {
        self.sequence
            .iter()
            .rev()
            .filter_map(|uuid| self.orders.get(uuid))
    }
}

/// Process-local order store. Every write happens under a single lock guard, so readers never
/// observe a partially written order.
#[derive(Debug, Default)]
pub struct InMemoryOrdersRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryOrdersRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrdersRepository for InMemoryOrdersRepository {
    async fn create_order(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let mut state = self.state.write().await;

        if state.orders.contains_key(&order.uuid)
            || state.by_number.contains_key(&order.order_number)
        {
            return Err(RepositoryError::AlreadyExists);
        }

        let now = Timestamp::now();

        let stored = Order {
            uuid: order.uuid,
            order_number: order.order_number,
            items: order
                .items
                .into_iter()
                .map(|item| into_order_item(item, now))
                .collect(),
            subtotal: order.subtotal,
            total: order.total,
            status: order.status,
            payment_method: order.payment_method,
            estimated_time_minutes: order.estimated_time_minutes,
            user_id: order.user_id,
            created_at: now,
            updated_at: now,
        };

        state
            .by_number
            .insert(stored.order_number.clone(), stored.uuid);
        state.sequence.push(stored.uuid);
        state.orders.insert(stored.uuid, stored.clone());

        debug!(order = %stored.uuid, number = %stored.order_number, "stored order");

        Ok(stored)
    }

    async fn find_order_by_id(&self, order: OrderUuid) -> Result<Option<Order>, RepositoryError> {
        Ok(self.state.read().await.orders.get(&order).cloned())
    }

    async fn find_order_by_number(
        &self,
        number: OrderNumber,
    ) -> Result<Option<Order>, RepositoryError> {
        let state = self.state.read().await;

        Ok(state
            .by_number
            .get(&number)
            .and_then(|uuid| state.orders.get(uuid))
            .cloned())
    }

    async fn find_orders_by_user(&self, user: UserId) -> Result<Vec<Order>, RepositoryError> {
        let state = self.state.read().await;

        Ok(state
            .newest_first()
            .filter(|order| order.user_id.as_ref() == Some(&user))
            .cloned()
            .collect())
    }

    async fn list_recent_orders(&self, limit: u32) -> Result<Vec<Order>, RepositoryError> {
        let state = self.state.read().await;

        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(state.newest_first().take(limit).cloned().collect())
    }

    async fn update_order_status(
        &self,
        order: OrderUuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut state = self.state.write().await;

        let stored = state
            .orders
            .get_mut(&order)
            .ok_or(RepositoryError::NotFound)?;

        if stored.status != from {
            return Err(RepositoryError::StatusChanged(stored.status));
        }

        stored.status = to;
        stored.updated_at = Timestamp::now();

        Ok(stored.clone())
    }
}

fn into_order_item(item: NewOrderItem, created_at: Timestamp) -> OrderItem {
    OrderItem {
        uuid: item.uuid,
        product_id: item.product_id,
        product_name: item.product_name,
        quantity: item.quantity,
        price: item.price,
        subtotal: item.subtotal,
        created_at,
    }
}

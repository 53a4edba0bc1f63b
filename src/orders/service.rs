//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, error, info, warn};

use crate::{
    cart::LineItem,
    orders::{
        ErrorKind, Order, OrderBuilder, OrderError, OrderNumber, OrderStatus, OrderUuid, UserId,
        data::NewOrderRequest, history, status::transition,
    },
    repository::OrdersRepository,
};

/// Most orders returned by a single recent-orders listing.
pub const MAX_RECENT_ORDERS: u32 = 50;

/// Orders service backed by an [`OrdersRepository`].
#[derive(Debug)]
pub struct StoreOrdersService<R> {
    repository: R,
    builder: OrderBuilder,
}

impl<R: OrdersRepository> StoreOrdersService<R> {
    /// Serve orders from `repository`, building new ones with `builder`.
    #[must_use]
    pub fn new(repository: R, builder: OrderBuilder) -> Self {
        Self {
            repository,
            builder,
        }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The builder new orders are created with.
    pub fn builder(&self) -> &OrderBuilder {
        &self.builder
    }
}

#[async_trait]
impl<R: OrdersRepository> OrdersService for StoreOrdersService<R> {
    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, request),
        fields(
            items = request.items.len(),
            payment_method = %request.payment_method,
            order = tracing::field::Empty,
        )
    )]
    async fn create_order(&self, request: NewOrderRequest) -> Result<Order, OrderError> {
        let order = self
            .builder
            .create_order(
                &self.repository,
                request.items,
                &request.payment_method,
                request.user_id,
            )
            .await
            .inspect_err(log_failure)?;

        Span::current().record("order", tracing::field::display(order.uuid));

        info!(number = %order.order_number, status = %order.status, "order placed");

        Ok(order)
    }

    #[tracing::instrument(name = "orders.service.get_order", skip(self))]
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrderError> {
        self.repository
            .find_order_by_id(order)
            .await?
            .ok_or(OrderError::NotFound)
    }

    #[tracing::instrument(name = "orders.service.get_order_by_number", skip(self))]
    async fn get_order_by_number(&self, number: OrderNumber) -> Result<Order, OrderError> {
        self.repository
            .find_order_by_number(number)
            .await?
            .ok_or(OrderError::NotFound)
    }

    #[tracing::instrument(name = "orders.service.list_user_orders", skip(self))]
    async fn list_user_orders(&self, user: UserId) -> Result<Vec<Order>, OrderError> {
        Ok(self.repository.find_orders_by_user(user).await?)
    }

    #[tracing::instrument(name = "orders.service.list_recent_orders", skip(self))]
    async fn list_recent_orders(&self, limit: u32) -> Result<Vec<Order>, OrderError> {
        let limit = limit.clamp(1, MAX_RECENT_ORDERS);

        Ok(self.repository.list_recent_orders(limit).await?)
    }

    #[tracing::instrument(name = "orders.service.update_status", skip(self))]
    async fn update_status(&self, order: OrderUuid, status: String) -> Result<Order, OrderError> {
        let next: OrderStatus = status.parse().inspect_err(log_failure)?;

        let updated = transition(&self.repository, order, next)
            .await
            .inspect_err(log_failure)?;

        info!(status = %updated.status, "order status updated");

        Ok(updated)
    }

    #[tracing::instrument(name = "orders.service.reorder", skip(self))]
    async fn reorder(&self, order: OrderUuid) -> Result<Vec<LineItem>, OrderError> {
        let order = self
            .repository
            .find_order_by_id(order)
            .await?
            .ok_or(OrderError::NotFound)?;

        Ok(history::reorder(&order))
    }
}

fn log_failure(error: &OrderError) {
    match error.kind() {
        ErrorKind::Persistence => error!(%error, "order operation failed"),
        ErrorKind::Validation | ErrorKind::NotFound | ErrorKind::Conflict => {
            warn!(%error, "order request rejected");
        }
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Places an order from a cart snapshot.
    async fn create_order(&self, request: NewOrderRequest) -> Result<Order, OrderError>;

    /// Retrieves a single order.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrderError>;

    /// Retrieves a single order by its human-facing number.
    async fn get_order_by_number(&self, number: OrderNumber) -> Result<Order, OrderError>;

    /// Retrieves a user's orders, newest first.
    async fn list_user_orders(&self, user: UserId) -> Result<Vec<Order>, OrderError>;

    /// Retrieves the most recent orders, newest first. `limit` is clamped to
    /// `1..=MAX_RECENT_ORDERS`.
    async fn list_recent_orders(&self, limit: u32) -> Result<Vec<Order>, OrderError>;

    /// Moves an order to the status named by `status`.
    async fn update_status(&self, order: OrderUuid, status: String) -> Result<Order, OrderError>;

    /// Cart lines that reproduce a past order.
    async fn reorder(&self, order: OrderUuid) -> Result<Vec<LineItem>, OrderError>;
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use rusty_money::{Money, iso};
    use testresult::TestResult;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::{
        layer::{Context, Layer, SubscriberExt},
        util::SubscriberInitExt,
    };

    use crate::{
        orders::{
            PaymentMethod,
            estimates::FixedPrepTime,
            numbers::SequentialOrderNumbers,
        },
        products::ProductId,
        repository::{InMemoryOrdersRepository, MockOrdersRepository, RepositoryError},
    };

    use super::*;

    /// Counts `ERROR` events seen by the thread's subscriber.
    #[derive(Debug, Default, Clone)]
    struct ErrorEvents(Arc<AtomicUsize>);

    impl ErrorEvents {
        fn count(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl<S: Subscriber> Layer<S> for ErrorEvents {
        fn on_event(&self, event: &Event<'_>, _context: Context<'_, S>) {
            if *event.metadata().level() == Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn memory_service() -> StoreOrdersService<InMemoryOrdersRepository> {
        StoreOrdersService::new(
            InMemoryOrdersRepository::new(),
            OrderBuilder::new(iso::USD)
                .with_numbers(SequentialOrderNumbers::starting_at(100))
                .with_estimator(FixedPrepTime(16)),
        )
    }

    fn request(user: Option<&str>) -> TestResult<NewOrderRequest> {
        Ok(NewOrderRequest {
            items: vec![
                LineItem::new(
                    ProductId::new("soy-milk")?,
                    "Soy Milk",
                    Money::from_minor(200, iso::USD),
                    2,
                ),
                LineItem::new(
                    ProductId::new("egg-crepe")?,
                    "Egg Crepe",
                    Money::from_minor(350, iso::USD),
                    1,
                ),
            ],
            payment_method: "MASTERCARD".to_string(),
            user_id: user.map(UserId::new).transpose()?,
        })
    }

    #[tokio::test]
    async fn create_order_persists_pending_order() -> TestResult {
        let service = memory_service();

        let order = service.create_order(request(None)?).await?;

        assert_eq!(order.total, Money::from_minor(750, iso::USD));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_method, PaymentMethod::Mastercard);
        assert_eq!(order.estimated_time_minutes, 16);

        let fetched = service.get_order(order.uuid).await?;

        assert_eq!(fetched, order);

        let by_number = service.get_order_by_number(order.order_number.clone()).await?;

        assert_eq!(by_number.uuid, order.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_order_is_not_found() {
        let service = memory_service();

        let result = service.get_order(OrderUuid::new()).await;

        assert!(
            matches!(result, Err(OrderError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn valid_transitions_are_durable() -> TestResult {
        let service = memory_service();

        let order = service.create_order(request(None)?).await?;

        service
            .update_status(order.uuid, "CONFIRMED".to_string())
            .await?;
        service
            .update_status(order.uuid, "READY".to_string())
            .await?;

        let fetched = service.get_order(order.uuid).await?;

        assert_eq!(fetched.status, OrderStatus::Ready);
        assert_eq!(fetched.total, order.total);
        assert_eq!(fetched.items, order.items);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_status_leaves_order_unchanged() -> TestResult {
        let service = memory_service();

        let order = service.create_order(request(None)?).await?;

        let result = service
            .update_status(order.uuid, "SHIPPED".to_string())
            .await;

        assert!(matches!(result, Err(OrderError::InvalidStatus(_))));
        assert_eq!(service.get_order(order.uuid).await?.status, OrderStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_status_never_reaches_repository() {
        let mut repository = MockOrdersRepository::new();

        repository.expect_find_order_by_id().never();
        repository.expect_update_order_status().never();

        let service = StoreOrdersService::new(repository, OrderBuilder::new(iso::USD));

        let result = service
            .update_status(OrderUuid::new(), "SHIPPED".to_string())
            .await;

        assert!(matches!(result, Err(OrderError::InvalidStatus(_))));
    }

    #[tokio::test]
    async fn storage_failure_is_logged_once() {
        let errors = ErrorEvents::default();

        let _subscriber = tracing_subscriber::registry()
            .with(errors.clone())
            .set_default();

        let mut repository = MockOrdersRepository::new();

        repository
            .expect_find_order_by_id()
            .return_once(|_| Err(RepositoryError::InvalidData));
        repository.expect_update_order_status().never();

        let service = StoreOrdersService::new(repository, OrderBuilder::new(iso::USD));

        let result = service
            .update_status(OrderUuid::new(), "CONFIRMED".to_string())
            .await;

        assert!(matches!(
            result,
            Err(OrderError::Persistence(RepositoryError::InvalidData))
        ));
        assert_eq!(errors.count(), 1, "one failure, one error event");
    }

    #[tokio::test]
    async fn backward_transition_is_conflict() -> TestResult {
        let service = memory_service();

        let order = service.create_order(request(None)?).await?;

        service
            .update_status(order.uuid, "DELIVERED".to_string())
            .await?;

        let result = service
            .update_status(order.uuid, "PREPARING".to_string())
            .await;

        assert!(matches!(
            result,
            Err(OrderError::IllegalTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Preparing
            })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn transition_of_unknown_order_is_not_found() {
        let service = memory_service();

        let result = service
            .update_status(OrderUuid::new(), "CONFIRMED".to_string())
            .await;

        assert!(matches!(result, Err(OrderError::NotFound)));
    }

    #[tokio::test]
    async fn recent_orders_limit_is_clamped() {
        let mut repository = MockOrdersRepository::new();

        repository
            .expect_list_recent_orders()
            .once()
            .withf(|limit| *limit == MAX_RECENT_ORDERS)
            .return_once(|_| Ok(Vec::new()));

        repository
            .expect_list_recent_orders()
            .once()
            .withf(|limit| *limit == 1)
            .return_once(|_| Ok(Vec::new()));

        let service = StoreOrdersService::new(repository, OrderBuilder::new(iso::USD));

        assert!(matches!(service.list_recent_orders(500).await, Ok(orders) if orders.is_empty()));
        assert!(matches!(service.list_recent_orders(0).await, Ok(orders) if orders.is_empty()));
    }

    #[tokio::test]
    async fn list_user_orders_only_returns_that_user() -> TestResult {
        let service = memory_service();

        service.create_order(request(Some("amy"))?).await?;
        service.create_order(request(Some("bo"))?).await?;
        let latest = service.create_order(request(Some("amy"))?).await?;

        let orders = service.list_user_orders(UserId::new("amy")?).await?;

        assert_eq!(orders.len(), 2);
        assert_eq!(orders.first().map(|order| order.uuid), Some(latest.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn reorder_returns_historical_lines() -> TestResult {
        let service = memory_service();

        let order = service.create_order(request(None)?).await?;

        let lines = service.reorder(order.uuid).await?;

        assert_eq!(lines, request(None)?.items);

        Ok(())
    }
}

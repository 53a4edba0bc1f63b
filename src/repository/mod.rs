//! Orders Repository
//!
//! The storage seam for orders. The core ships an in-memory store; the PostgreSQL store lives in
//! `morsel-app`.

use std::error::Error as StdError;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::orders::{Order, OrderNumber, OrderStatus, OrderUuid, UserId, data::NewOrder};

mod memory;

pub use memory::InMemoryOrdersRepository;

/// Errors reported by an [`OrdersRepository`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// An order with the same id or order number is already stored.
    #[error("order already exists")]
    AlreadyExists,

    /// The order does not exist.
    #[error("order not found")]
    NotFound,

    /// The order's stored status is not the one the write expected. Carries the stored status.
    #[error("order status changed to {0}")]
    StatusChanged(OrderStatus),

    /// The store rejected the data as violating one of its constraints.
    #[error("invalid data")]
    InvalidData,

    /// Any other storage failure.
    #[error("storage error")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),
}

#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Store an order and all of its items atomically: either everything is written or nothing.
    async fn create_order(&self, order: NewOrder) -> Result<Order, RepositoryError>;

    /// Load an order with its items.
    async fn find_order_by_id(&self, order: OrderUuid) -> Result<Option<Order>, RepositoryError>;

    /// Load an order by its human-facing number.
    async fn find_order_by_number(
        &self,
        number: OrderNumber,
    ) -> Result<Option<Order>, RepositoryError>;

    /// All orders placed by a user, newest first.
    async fn find_orders_by_user(&self, user: UserId) -> Result<Vec<Order>, RepositoryError>;

    /// The most recent orders across all users, newest first.
    async fn list_recent_orders(&self, limit: u32) -> Result<Vec<Order>, RepositoryError>;

    /// Move an order from `from` to `to` and bump its update time, returning the updated order.
    ///
    /// The write only applies while the stored status is still `from`; otherwise nothing changes
    /// and [`RepositoryError::StatusChanged`] reports the stored status.
    async fn update_order_status(
        &self,
        order: OrderUuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Order, RepositoryError>;
}

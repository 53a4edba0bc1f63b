//! Order Status
//!
//! Orders move forward through the kitchen workflow, `PENDING` to `DELIVERED`, and can be
//! cancelled at any point before they reach a terminal state.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use tracing::debug;

use crate::{
    orders::{Order, OrderError, OrderUuid},
    repository::{OrdersRepository, RepositoryError},
};

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Submitted, awaiting confirmation.
    Pending,

    /// Accepted by the store.
    Confirmed,

    /// Being prepared.
    Preparing,

    /// Ready for pickup.
    Ready,

    /// Handed over. Terminal.
    Delivered,

    /// Abandoned. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// Every status, forward chain first.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Ready,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Wire name, e.g. `"PREPARING"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether no further transition is possible.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Position in the forward chain. Cancellation sits outside it.
    const fn stage(self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::Confirmed => Some(1),
            Self::Preparing => Some(2),
            Self::Ready => Some(3),
            Self::Delivered => Some(4),
            Self::Cancelled => None,
        }
    }

    /// Whether an order in this status may move to `next`.
    ///
    /// Non-terminal orders may be cancelled or moved to any strictly later forward status, so
    /// skipping `PREPARING` is allowed but going back to it is not. Self-transitions are rejected.
    pub const fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }

        match (self.stage(), next.stage()) {
            (Some(_), None) => true,
            (Some(current), Some(next)) => next > current,
            (None, _) => false,
        }
    }

    /// Validate a move to `next`, returning the new status.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::IllegalTransition`] when [`OrderStatus::can_transition_to`] is false.
    pub fn transition_to(self, next: Self) -> Result<Self, OrderError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(OrderError::IllegalTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();

        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| OrderError::InvalidStatus(s.to_string()))
    }
}

/// Load an order, validate the move to `next` and persist it.
///
/// Totals and items are never touched; only the status and update time change. The write is
/// conditional on the status that was validated; if another writer moved the order first, the
/// move is validated again against the status that writer left behind.
///
/// # Errors
///
/// - [`OrderError::NotFound`]: no order has this id.
/// - [`OrderError::IllegalTransition`]: the move is not allowed from the current status.
/// - [`OrderError::Persistence`]: the repository failed.
pub async fn transition<R>(
    repository: &R,
    order: OrderUuid,
    next: OrderStatus,
) -> Result<Order, OrderError>
where
    R: OrdersRepository + ?Sized,
{
    let mut current = repository
        .find_order_by_id(order)
        .await?
        .ok_or(OrderError::NotFound)?
        .status;

    // Every lost race means another writer made a forward move, so this settles once the order
    // is terminal.
    loop {
        current.transition_to(next)?;

        debug!(%order, from = %current, to = %next, "applying status transition");

        match repository.update_order_status(order, current, next).await {
            Err(RepositoryError::StatusChanged(stored)) => {
                debug!(%order, expected = %current, %stored, "status changed concurrently");

                current = stored;
            }
            result => return Ok(result?),
        }
    }
}

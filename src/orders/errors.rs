//! Order errors.

use thiserror::Error;

use crate::{
    cart::CartError,
    money::AmountError,
    orders::OrderStatus,
    products::ProductId,
    repository::RepositoryError,
};

/// Broad classes of [`OrderError`], used by transports to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent something unusable.
    Validation,

    /// The order does not exist.
    NotFound,

    /// The request conflicts with the order's current state.
    Conflict,

    /// The store failed.
    Persistence,
}

/// Errors raised while building, reading or transitioning orders.
#[derive(Debug, Error)]
pub enum OrderError {
    /// No line with a positive quantity was submitted.
    #[error("cannot place an order without items")]
    EmptyCart,

    /// The payment label is not one of the accepted methods.
    #[error("unknown payment method: {0:?}")]
    InvalidPaymentMethod(String),

    /// The status text is not a known status.
    #[error("unknown order status: {0:?}")]
    InvalidStatus(String),

    /// The text is not a well-formed order number.
    #[error("malformed order number: {0:?}")]
    InvalidOrderNumber(String),

    /// A blank user id.
    #[error("user id cannot be empty")]
    InvalidUserId,

    /// The status machine does not allow this move.
    #[error("cannot move order from {from} to {to}")]
    IllegalTransition {
        /// Current status.
        from: OrderStatus,

        /// Requested status.
        to: OrderStatus,
    },

    /// An item is priced in a different currency than the store.
    #[error("product {product} is priced in {actual}, expected {expected}")]
    CurrencyMismatch {
        /// Offending product.
        product: ProductId,

        /// ISO code of the store currency.
        expected: &'static str,

        /// ISO code of the item price.
        actual: &'static str,
    },

    /// A line or order total left the minor-unit range.
    #[error("order amount overflowed")]
    AmountOverflow,

    /// An amount could not be used.
    #[error("invalid amount")]
    InvalidAmount(#[source] AmountError),

    /// An item was rejected while merging lines.
    #[error("invalid order item")]
    InvalidItem(#[source] CartError),

    /// No order matches the given reference.
    #[error("order not found")]
    NotFound,

    /// The repository failed; the cause is kept as the source.
    #[error("order storage failed")]
    Persistence(#[source] RepositoryError),
}

impl OrderError {
    /// Classify this error for the transport layer.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyCart
            | Self::InvalidPaymentMethod(_)
            | Self::InvalidStatus(_)
            | Self::InvalidOrderNumber(_)
            | Self::InvalidUserId
            | Self::CurrencyMismatch { .. }
            | Self::AmountOverflow
            | Self::InvalidAmount(_)
            | Self::InvalidItem(_) => ErrorKind::Validation,
            Self::NotFound => ErrorKind::NotFound,
            Self::IllegalTransition { .. } => ErrorKind::Conflict,
            Self::Persistence(_) => ErrorKind::Persistence,
        }
    }
}

impl From<AmountError> for OrderError {
    fn from(error: AmountError) -> Self {
        match error {
            AmountError::Overflow => Self::AmountOverflow,
            other => Self::InvalidAmount(other),
        }
    }
}

impl From<CartError> for OrderError {
    fn from(error: CartError) -> Self {
        match error {
            CartError::CurrencyMismatch {
                product,
                item_currency,
                cart_currency,
            } => Self::CurrencyMismatch {
                product,
                expected: cart_currency,
                actual: item_currency,
            },
            other => Self::InvalidItem(other),
        }
    }
}

impl From<RepositoryError> for OrderError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Persistence(other),
        }
    }
}

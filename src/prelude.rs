//! Morsel prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, LineItem},
    money::{Amount, AmountError, format_amount, line_total, parse_amount},
    orders::{
        ErrorKind, Order, OrderBuilder, OrderError, OrderItem, OrderNumber, OrderStatus,
        OrderUuid, OrdersService, PaymentMethod, StoreOrdersService, UserId,
        data::{NewOrder, NewOrderItem, NewOrderRequest},
        estimates::{FixedPrepTime, PrepTimeEstimator, RandomPrepTime},
        history::reorder,
        numbers::{OrderNumberGenerator, RandomOrderNumbers, SequentialOrderNumbers},
    },
    products::ProductId,
    repository::{InMemoryOrdersRepository, OrdersRepository, RepositoryError},
};

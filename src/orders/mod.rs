//! Orders
//!
//! Everything from the moment a cart is checked out: building and storing the order snapshot,
//! moving it through the status machine and turning it back into cart lines.

pub mod builder;
pub mod data;
pub mod errors;
pub mod estimates;
pub mod history;
pub mod numbers;
pub mod payment;
pub mod records;
pub mod service;
pub mod status;

pub use builder::OrderBuilder;
pub use errors::{ErrorKind, OrderError};
pub use numbers::OrderNumber;
pub use payment::PaymentMethod;
pub use records::{Order, OrderItem, OrderItemUuid, OrderUuid, UserId};
pub use service::*;
pub use status::OrderStatus;

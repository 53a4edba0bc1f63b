//! Orders
//!
//! `PostgreSQL` storage for orders.

mod errors;
mod items;
mod records;
mod repository;

pub use repository::PgOrdersRepository;

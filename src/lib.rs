//! Morsel
//!
//! Morsel is the cart and order lifecycle core of a small food-ordering storefront: a session cart
//! with exact money arithmetic, an order builder that snapshots a cart into a durable order, a
//! status machine for the kitchen workflow and reorder support for order history.

pub mod cart;
pub mod money;
pub mod orders;
pub mod prelude;
pub mod products;
pub mod repository;
pub mod uuids;

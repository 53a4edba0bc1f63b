//! Shared application persistence and wiring for the Morsel storefront.

pub mod context;
pub mod database;
pub mod orders;

#[cfg(test)]
mod test;

//! App Context

use std::sync::Arc;

use morsel::{
    orders::{OrderBuilder, OrdersService, StoreOrdersService},
    repository::InMemoryOrdersRepository,
};
use rusty_money::iso::Currency;
use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{database, orders::PgOrdersRepository};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context backed by `PostgreSQL`, applying pending migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(
        url: &str,
        currency: &'static Currency,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        info!(currency = currency.iso_alpha_code, "using postgres order storage");

        Ok(Self {
            orders: Arc::new(StoreOrdersService::new(
                PgOrdersRepository::new(pool),
                OrderBuilder::new(currency),
            )),
        })
    }

    /// Build application context backed by process memory. Orders are lost on restart.
    pub fn in_memory(currency: &'static Currency) -> Self {
        info!(currency = currency.iso_alpha_code, "using in-memory order storage");

        Self {
            orders: Arc::new(StoreOrdersService::new(
                InMemoryOrdersRepository::new(),
                OrderBuilder::new(currency),
            )),
        }
    }
}

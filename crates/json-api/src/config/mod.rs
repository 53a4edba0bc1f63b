//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig, logging::LoggingConfig, server::ServerRuntimeConfig, store::StoreConfig,
};

pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod server;
pub(crate) mod store;

/// Morsel JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "morsel-json", about = "Morsel JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Order storage settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Storefront settings.
    #[command(flatten)]
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

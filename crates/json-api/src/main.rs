//! Morsel JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use morsel_app::context::{AppContext, AppInitError};

use crate::{
    config::{ServerConfig, db::StorageBackend},
    state::State,
};

mod config;
mod extensions;
mod healthcheck;
mod observability;
mod orders;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Morsel JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "the subscriber failed to install, so there is nowhere else to report it"
        )]
        {
            eprintln!("{init_error}");
        }

        process::exit(1);
    }

    let app = match build_app_context(&config).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!(currency = config.store.currency.iso_alpha_code, "Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app, config.store.currency)))
        .push(router::app_router());

    let doc = OpenApi::new("Morsel API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;
}

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("DATABASE_URL is required by the postgres storage backend")]
    MissingDatabaseUrl,

    #[error(transparent)]
    App(#[from] AppInitError),
}

async fn build_app_context(config: &ServerConfig) -> Result<AppContext, StartupError> {
    let currency = config.store.currency;

    match config.database.storage_backend {
        StorageBackend::Postgres => {
            let url = config
                .database
                .database_url
                .as_deref()
                .ok_or(StartupError::MissingDatabaseUrl)?;

            Ok(AppContext::from_database_url(url, currency).await?)
        }
        StorageBackend::Memory => Ok(AppContext::in_memory(currency)),
    }
}

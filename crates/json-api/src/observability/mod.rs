//! Tracing for the order API.

use thiserror::Error;

use crate::config::ServerConfig;

mod logging;

#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    /// `RUST_LOG` / `--log-level` is not a valid filter directive list.
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),

    /// Another global subscriber is already installed.
    #[error("could not install the tracing subscriber: {0}")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the process-wide subscriber in the configured format.
pub(crate) fn init(config: &ServerConfig) -> Result<(), ObservabilityError> {
    logging::install(config)
}

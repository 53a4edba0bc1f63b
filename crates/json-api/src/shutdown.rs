//! Draining the order API on SIGINT/SIGTERM.

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("could not listen for SIGINT: {0}")]
    Interrupt(#[source] io::Error),

    #[cfg(unix)]
    #[error("could not listen for SIGTERM: {0}")]
    Terminate(#[source] io::Error),
}

#[cfg(unix)]
async fn sigterm() -> Result<(), ShutdownSignalError> {
    let mut stream = signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::Terminate)?;

    stream.recv().await;

    Ok(())
}

#[cfg(not(unix))]
async fn sigterm() -> Result<(), ShutdownSignalError> {
    std::future::pending().await
}

/// Block until the process is asked to stop, then give in-flight order requests `grace` to
/// complete before the server closes their connections.
pub(crate) async fn listen(
    handle: ServerHandle,
    grace: Duration,
) -> Result<(), ShutdownSignalError> {
    let signal = tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownSignalError::Interrupt)?;
            "SIGINT"
        }
        result = sigterm() => {
            result?;
            "SIGTERM"
        }
    };

    info!(signal, grace_secs = grace.as_secs(), "draining order API");

    handle.stop_graceful(grace);

    Ok(())
}

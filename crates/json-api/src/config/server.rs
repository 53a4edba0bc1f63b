//! Listener Config

use std::time::Duration;

use clap::Args;

/// Where the order API listens and how long it drains on shutdown.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface to bind, e.g. `127.0.0.1` to stay off the network
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port for the order API
    #[arg(short, long, env = "SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Seconds in-flight order requests get to finish after a shutdown signal
    #[arg(long, env = "SHUTDOWN_GRACE_SECS", default_value = "10")]
    pub shutdown_grace_secs: u64,
}

impl ServerRuntimeConfig {
    /// `host:port`, as handed to the TCP listener.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

//! Database Config

use clap::{Args, ValueEnum};

/// Where orders are kept.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StorageBackend {
    /// `PostgreSQL`, migrated on startup.
    Postgres,

    /// Process memory. Orders are lost on restart.
    Memory,
}

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// Order storage backend (postgres, memory)
    #[arg(
        long,
        env = "STORAGE_BACKEND",
        value_enum,
        default_value_t = StorageBackend::Postgres
    )]
    pub storage_backend: StorageBackend,

    /// `PostgreSQL` connection string, required by the postgres backend
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

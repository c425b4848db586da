//! Server configuration read from command line flags and environment variables.

use std::{net::IpAddr, path::PathBuf};

use clap::{Parser, ValueEnum};

use crate::Error;

/// The kind of database that stores the vouchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// A local SQLite database file.
    Sqlite,
    /// A PostgreSQL server.
    Postgres,
    /// A hosted database with a REST interface, e.g. Supabase.
    Hosted,
}

/// The REST API server for vouchers.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// The address to listen on.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// The database that stores the vouchers.
    #[arg(long, env = "VOUCHER_BACKEND", value_enum, default_value_t = Backend::Sqlite)]
    pub backend: Backend,

    /// File path to the SQLite database, used by the `sqlite` backend.
    #[arg(long, env = "DB_PATH", default_value = "./vouchers.db")]
    pub db_path: PathBuf,

    /// PostgreSQL connection string, required by the `postgres` backend.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Project URL of the hosted database, required by the `hosted` backend.
    #[arg(long, env = "SUPABASE_URL")]
    pub hosted_url: Option<String>,

    /// Access key for the hosted database, required by the `hosted` backend.
    #[arg(long, env = "SUPABASE_KEY")]
    pub hosted_key: Option<String>,

    /// File that debug level logs are appended to.
    #[arg(long, env = "LOG_PATH", default_value = "debug.log")]
    pub log_path: PathBuf,
}

/// Everything needed to open the selected backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Open the SQLite database at `path`, creating it if needed.
    SQLite {
        /// Path to the database file.
        path: PathBuf,
    },
    /// Connect to the PostgreSQL server at `url`.
    Postgres {
        /// The connection string.
        url: String,
    },
    /// Talk to the hosted database at `url` using `key`.
    Hosted {
        /// The project URL.
        url: String,
        /// The access key.
        key: String,
    },
}

impl Config {
    /// Check that the selected backend has the settings it needs.
    ///
    /// # Errors
    /// Returns [Error::MissingCredentials] naming the first missing setting.
    pub fn store_config(&self) -> Result<StoreConfig, Error> {
        match self.backend {
            Backend::Sqlite => Ok(StoreConfig::SQLite {
                path: self.db_path.clone(),
            }),
            Backend::Postgres => Ok(StoreConfig::Postgres {
                url: non_empty(&self.database_url)
                    .ok_or(Error::MissingCredentials("--database-url / DATABASE_URL"))?,
            }),
            Backend::Hosted => Ok(StoreConfig::Hosted {
                url: non_empty(&self.hosted_url)
                    .ok_or(Error::MissingCredentials("--hosted-url / SUPABASE_URL"))?,
                key: non_empty(&self.hosted_key)
                    .ok_or(Error::MissingCredentials("--hosted-key / SUPABASE_KEY"))?,
            }),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

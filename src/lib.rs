//! Voucher Service is a small JSON API for recording payment vouchers.
//!
//! Vouchers are stored in a single table in one of several backing stores
//! (an SQLite file, a PostgreSQL server or a hosted REST database) which is
//! chosen when the server starts.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod config;
mod db;
mod endpoints;
mod extract;
mod logging;
mod not_found;
mod routing;
mod status;
mod store;
mod voucher;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use config::{Backend, Config, StoreConfig};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use store::{
    DistinctField, HostedVoucherStore, PostgresVoucherStore, SQLiteVoucherStore,
    SharedVoucherStore, VoucherStore, connect_store,
};
pub use voucher::{Amount, Voucher, VoucherData, VoucherId};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
///
/// Every backend failure is reported to the client the same way: status 500
/// with the driver's message in the `error` field of a JSON object.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error returned by the SQLite driver.
    #[error("{0}")]
    Sql(rusqlite::Error),

    /// An error returned by the PostgreSQL driver.
    #[error("{0}")]
    Postgres(sqlx::Error),

    /// The hosted backend could not be reached or rejected the request.
    ///
    /// The string holds the message returned by the backend, or the
    /// transport error if there was no response.
    #[error("{0}")]
    Hosted(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The request body, path or query string could not be parsed.
    #[error("{0}")]
    InvalidRequest(String),

    /// The selected backend needs a setting that was not provided.
    ///
    /// The string names the missing flag and environment variable.
    #[error("missing configuration for the selected backend: {0}")]
    MissingCredentials(&'static str),

    /// An I/O error at startup, e.g. when opening the log file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::Sql(value)
    }
}

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        tracing::error!("an unhandled PostgreSQL error occurred: {}", value);
        Error::Postgres(value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        tracing::error!("a request to the hosted backend failed: {}", value);
        Error::Hosted(value.to_string())
    }
}

impl From<JsonRejection> for Error {
    fn from(value: JsonRejection) -> Self {
        Error::InvalidRequest(value.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(value: PathRejection) -> Self {
        Error::InvalidRequest(value.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(value: QueryRejection) -> Self {
        Error::InvalidRequest(value.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::InvalidRequest(ref message) => {
                tracing::debug!("Rejected malformed request: {message}");
                StatusCode::BAD_REQUEST
            }
            ref error => {
                tracing::error!("An unexpected error occurred: {}", error);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

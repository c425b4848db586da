//! Handlers that report on the service itself rather than on vouchers.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{Error, store::SharedVoucherStore};

/// The banner returned by the root route.
pub const ROOT_MESSAGE: &str = "Voucher service is running";

/// A human readable status message.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    message: String,
}

/// Report that the service is up. Does not touch the database.
pub async fn get_root() -> Json<StatusMessage> {
    Json(StatusMessage {
        success: None,
        message: ROOT_MESSAGE.to_owned(),
    })
}

/// Check the connection to the database with a trivial read of the voucher table.
pub async fn get_test_db(
    State(store): State<SharedVoucherStore>,
) -> Result<Json<StatusMessage>, Error> {
    store.ping().await?;
    tracing::debug!("Database connection test succeeded");

    Ok(Json(StatusMessage {
        success: Some(true),
        message: "Database connection successful".to_owned(),
    }))
}

//! Voucher creation endpoint.

use axum::{Json, extract::State};

use crate::{
    Error,
    extract::JsonBody,
    store::SharedVoucherStore,
    voucher::{Success, VoucherData},
};

/// Save a new voucher. The store assigns its ID.
///
/// No field is required; missing fields are stored as `NULL`.
pub async fn create_voucher_endpoint(
    State(store): State<SharedVoucherStore>,
    JsonBody(data): JsonBody<VoucherData>,
) -> Result<Json<Success>, Error> {
    tracing::info!("Saving voucher: {data:?}");

    let voucher = store.create(data).await?;
    tracing::debug!("Created voucher with id: {}", voucher.id);

    Ok(Json(Success::new()))
}

//! Voucher update endpoint.

use axum::{Json, extract::State};

use crate::{
    Error,
    extract::{JsonBody, PathParam},
    store::SharedVoucherStore,
    voucher::{Success, VoucherData, VoucherId},
};

/// Overwrite every field of the voucher with the ID in the path.
///
/// Responds with success even if no voucher has that ID, so clients cannot
/// tell an update from a no-op. An ID that is not an integer matches nothing.
pub async fn update_voucher_endpoint(
    State(store): State<SharedVoucherStore>,
    PathParam(voucher_id): PathParam<String>,
    JsonBody(data): JsonBody<VoucherData>,
) -> Result<Json<Success>, Error> {
    let rows_affected = match voucher_id.parse::<VoucherId>() {
        Ok(id) => store.update(id, data).await?,
        Err(_) => 0,
    };

    if rows_affected == 0 {
        tracing::debug!("No voucher with id {voucher_id} to update");
    } else {
        tracing::info!("Updated voucher with id: {voucher_id}");
    }

    Ok(Json(Success::new()))
}

//! Voucher deletion endpoint.

use axum::{Json, extract::State};

use crate::{
    Error,
    extract::PathParam,
    store::SharedVoucherStore,
    voucher::{Success, VoucherId},
};

/// Delete the voucher with the ID in the path.
///
/// Deleting a voucher that does not exist also succeeds, as does deleting with
/// an ID that is not an integer.
pub async fn delete_voucher_endpoint(
    State(store): State<SharedVoucherStore>,
    PathParam(voucher_id): PathParam<String>,
) -> Result<Json<Success>, Error> {
    let rows_affected = match voucher_id.parse::<VoucherId>() {
        Ok(id) => store.delete(id).await?,
        Err(_) => 0,
    };

    if rows_affected == 0 {
        tracing::debug!("No voucher with id {voucher_id} to delete");
    } else {
        tracing::info!("Deleted voucher with id: {voucher_id}");
    }

    Ok(Json(Success::new()))
}

//! Listing the vouchers filed under a month and year.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    Error,
    extract::{PathParam, QueryParams},
    store::SharedVoucherStore,
    voucher::Voucher,
};

/// The query string for listing vouchers.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    year: Option<String>,
}

/// Get the vouchers whose month and year exactly match the path and query.
///
/// A missing `year` matches no vouchers, the same as a year with no vouchers.
pub async fn get_vouchers_endpoint(
    State(store): State<SharedVoucherStore>,
    PathParam(month): PathParam<String>,
    QueryParams(query): QueryParams<PeriodQuery>,
) -> Result<Json<Vec<Voucher>>, Error> {
    tracing::info!("Querying for vouchers in {month} {:?}", query.year);

    let Some(year) = query.year else {
        return Ok(Json(Vec::new()));
    };

    let vouchers = store.list_by_period(&month, &year).await?;
    tracing::debug!("Found {} vouchers", vouchers.len());

    Ok(Json(vouchers))
}

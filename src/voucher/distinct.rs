//! Endpoints that list the distinct values of a voucher field, used to fill
//! filter menus in the client.

use axum::{Json, extract::State};

use crate::{
    Error,
    store::{DistinctField, SharedVoucherStore},
};

/// Get every distinct, non-empty category in ascending order.
pub async fn get_categories_endpoint(
    State(store): State<SharedVoucherStore>,
) -> Result<Json<Vec<String>>, Error> {
    get_distinct_values(store, DistinctField::Category).await
}

/// Get every distinct, non-empty payee/payer name in ascending order.
pub async fn get_names_endpoint(
    State(store): State<SharedVoucherStore>,
) -> Result<Json<Vec<String>>, Error> {
    get_distinct_values(store, DistinctField::Name).await
}

async fn get_distinct_values(
    store: SharedVoucherStore,
    field: DistinctField,
) -> Result<Json<Vec<String>>, Error> {
    let values = store.distinct_values(field).await?;
    tracing::debug!("Found {} distinct values for {}", values.len(), field.column());

    Ok(Json(values))
}

#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use axum::{body::Body, response::Response};
use rusqlite::Connection;
use serde_json::Value;

use crate::{
    db::initialize,
    store::{SQLiteVoucherStore, SharedVoucherStore},
    voucher::{Amount, VoucherData},
};

/// An in-memory SQLite voucher store with the voucher table created.
pub(crate) fn get_test_store() -> SharedVoucherStore {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not create voucher table");

    Arc::new(SQLiteVoucherStore::new(Arc::new(Mutex::new(connection))))
}

/// A voucher with every field set, filed under `month` and `year`.
pub(crate) fn sample_voucher_data(month: &str, year: &str) -> VoucherData {
    VoucherData {
        voucher_number: Some("V1".to_owned()),
        date: Some("2024-01-01".to_owned()),
        name: Some("A".to_owned()),
        bank: Some("X".to_owned()),
        cheque_number: Some("100".to_owned()),
        amount: Some(Amount::Number(50.5)),
        category: Some("Fees".to_owned()),
        month: Some(month.to_owned()),
        year: Some(year.to_owned()),
    }
}

/// Replace the parameter in `endpoint_path`, e.g. '/vouchers/{month_or_id}', with `value`.
pub(crate) fn format_endpoint(endpoint_path: &str, value: impl std::fmt::Display) -> String {
    match (endpoint_path.find('{'), endpoint_path.find('}')) {
        (Some(start), Some(end)) if start < end => format!(
            "{}{}{}",
            &endpoint_path[..start],
            value,
            &endpoint_path[end + 1..]
        ),
        _ => endpoint_path.to_owned(),
    }
}

#[track_caller]
pub(crate) fn get_header(response: &Response<Body>, header_name: &str) -> String {
    let header_error_message = format!("Headers missing {header_name}");

    response
        .headers()
        .get(header_name)
        .expect(&header_error_message)
        .to_str()
        .expect("Could not convert to str")
        .to_string()
}

pub(crate) async fn response_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    serde_json::from_slice(&body).expect("Response body is not JSON")
}

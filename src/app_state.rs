//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::store::{SharedVoucherStore, VoucherStore};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The store that every voucher request reads from and writes to.
    pub voucher_store: SharedVoucherStore,
}

impl AppState {
    /// Create a new [AppState] around an opened voucher store.
    pub fn new(voucher_store: Arc<dyn VoucherStore>) -> Self {
        Self { voucher_store }
    }
}

impl FromRef<AppState> for SharedVoucherStore {
    fn from_ref(state: &AppState) -> Self {
        state.voucher_store.clone()
    }
}

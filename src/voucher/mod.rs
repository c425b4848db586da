//! Vouchers: the domain types and the HTTP handlers that manage them.

mod create;
mod delete;
mod distinct;
mod domain;
mod edit;
mod list;

pub use create::create_voucher_endpoint;
pub use delete::delete_voucher_endpoint;
pub use distinct::{get_categories_endpoint, get_names_endpoint};
pub use domain::{Amount, Voucher, VoucherData, VoucherId};
pub use edit::update_voucher_endpoint;
pub use list::get_vouchers_endpoint;

use serde::Serialize;

/// The acknowledgement sent back after a successful write.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Success {
    success: bool,
}

impl Success {
    pub(crate) const fn new() -> Self {
        Self { success: true }
    }
}

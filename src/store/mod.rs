//! Contains the trait and implementations for objects that store [vouchers](crate::Voucher).

mod hosted;
mod postgres;
mod sqlite;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::Connection;

use crate::{
    Error,
    config::StoreConfig,
    voucher::{Voucher, VoucherData, VoucherId},
};

pub use hosted::HostedVoucherStore;
pub use postgres::PostgresVoucherStore;
pub use sqlite::SQLiteVoucherStore;

/// The name of the table that holds the vouchers in every backend.
pub(crate) const VOUCHER_TABLE: &str = "vouchers";

/// A voucher field that can be listed as a set of distinct values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctField {
    /// The voucher's category.
    Category,
    /// The payee/payer name.
    Name,
}

impl DistinctField {
    /// The column that holds this field.
    pub fn column(self) -> &'static str {
        match self {
            DistinctField::Category => "category",
            DistinctField::Name => "name",
        }
    }
}

/// A voucher store shared between request handlers.
pub type SharedVoucherStore = Arc<dyn VoucherStore>;

/// Creates, retrieves, updates and deletes vouchers in a backing store.
#[async_trait]
pub trait VoucherStore: Send + Sync {
    /// Get the vouchers whose month and year match exactly, in the store's natural order.
    async fn list_by_period(&self, month: &str, year: &str) -> Result<Vec<Voucher>, Error>;

    /// Add a voucher to the store and return it with its generated ID.
    async fn create(&self, data: VoucherData) -> Result<Voucher, Error>;

    /// Overwrite every field of the voucher with `id`.
    ///
    /// Returns the number of rows that were changed, which is zero if there is
    /// no voucher with `id`.
    async fn update(&self, id: VoucherId, data: VoucherData) -> Result<u64, Error>;

    /// Delete the voucher with `id`.
    ///
    /// Returns the number of rows that were deleted, which is zero if there is
    /// no voucher with `id`.
    async fn delete(&self, id: VoucherId) -> Result<u64, Error>;

    /// Get the distinct, non-empty values of `field` in ascending order.
    async fn distinct_values(&self, field: DistinctField) -> Result<Vec<String>, Error>;

    /// Check that the voucher table can be read.
    async fn ping(&self) -> Result<(), Error>;
}

/// Open the store described by `config`.
///
/// The SQLite and PostgreSQL stores create the voucher table if it does not
/// exist. The hosted store expects the table to already exist.
///
/// # Errors
/// Returns an error if the database cannot be opened or initialized.
pub async fn connect_store(config: &StoreConfig) -> Result<SharedVoucherStore, Error> {
    match config {
        StoreConfig::SQLite { path } => {
            tracing::info!("Opening SQLite database at {}", path.display());
            let connection = Connection::open(path)?;
            crate::db::initialize(&connection)?;

            Ok(Arc::new(SQLiteVoucherStore::new(Arc::new(Mutex::new(
                connection,
            )))))
        }
        StoreConfig::Postgres { url } => {
            tracing::info!("Connecting to PostgreSQL");
            let store = PostgresVoucherStore::connect(url).await?;
            store.ensure_schema().await?;

            Ok(Arc::new(store))
        }
        StoreConfig::Hosted { url, key } => {
            tracing::info!("Using hosted backend at {url}");

            Ok(Arc::new(HostedVoucherStore::new(url, key)?))
        }
    }
}

//! SQLite schema setup.

use rusqlite::Connection;

use crate::Error;

/// Create the voucher table if it does not exist.
///
/// Every column other than `id` is nullable and unconstrained.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS vouchers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            voucherNumber TEXT,
            date TEXT,
            name TEXT,
            bank TEXT,
            chequeNumber TEXT,
            amount REAL,
            category TEXT,
            month TEXT,
            year TEXT
        );",
    )?;

    Ok(())
}

//! Implements a SQLite backed voucher store.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{
    Connection, Row, params,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef},
};

use crate::{
    Error,
    store::{DistinctField, VoucherStore},
    voucher::{Amount, Voucher, VoucherData, VoucherId},
};

/// Creates, retrieves, updates and deletes vouchers in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteVoucherStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteVoucherStore {
    /// Create a new voucher store with a SQLite database.
    ///
    /// The caller is expected to have run [crate::initialize_db] on the connection.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

#[async_trait]
impl VoucherStore for SQLiteVoucherStore {
    async fn list_by_period(&self, month: &str, year: &str) -> Result<Vec<Voucher>, Error> {
        self.lock()?
            .prepare(
                "SELECT id, voucherNumber, date, name, bank, chequeNumber, amount, category, month, year
                FROM vouchers WHERE month = ?1 AND year = ?2;",
            )?
            .query_map((month, year), map_row)?
            .map(|maybe_voucher| maybe_voucher.map_err(|error| error.into()))
            .collect()
    }

    async fn create(&self, data: VoucherData) -> Result<Voucher, Error> {
        let connection = self.lock()?;
        connection.execute(
            "INSERT INTO vouchers (voucherNumber, date, name, bank, chequeNumber, amount, category, month, year)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                data.voucher_number,
                data.date,
                data.name,
                data.bank,
                data.cheque_number,
                data.amount,
                data.category,
                data.month,
                data.year,
            ],
        )?;

        let id = connection.last_insert_rowid();

        Ok(Voucher { id, data })
    }

    async fn update(&self, id: VoucherId, data: VoucherData) -> Result<u64, Error> {
        let rows_affected = self.lock()?.execute(
            "UPDATE vouchers SET voucherNumber = ?1, date = ?2, name = ?3, bank = ?4,
            chequeNumber = ?5, amount = ?6, category = ?7, month = ?8, year = ?9
            WHERE id = ?10;",
            params![
                data.voucher_number,
                data.date,
                data.name,
                data.bank,
                data.cheque_number,
                data.amount,
                data.category,
                data.month,
                data.year,
                id,
            ],
        )?;

        Ok(rows_affected as u64)
    }

    async fn delete(&self, id: VoucherId) -> Result<u64, Error> {
        let rows_affected = self
            .lock()?
            .execute("DELETE FROM vouchers WHERE id = ?1;", [id])?;

        Ok(rows_affected as u64)
    }

    async fn distinct_values(&self, field: DistinctField) -> Result<Vec<String>, Error> {
        let column = field.column();

        self.lock()?
            .prepare(&format!(
                "SELECT DISTINCT {column} FROM vouchers
                WHERE {column} IS NOT NULL AND {column} <> ''
                ORDER BY {column} ASC;"
            ))?
            .query_map([], |row| row.get(0))?
            .map(|maybe_value| maybe_value.map_err(|error| error.into()))
            .collect()
    }

    async fn ping(&self) -> Result<(), Error> {
        self.lock()?
            .prepare("SELECT id FROM vouchers LIMIT 1;")?
            .query([])?
            .next()?;

        Ok(())
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Amount::Number(amount) => ToSqlOutput::Owned(Value::Real(*amount)),
            Amount::Text(text) => ToSqlOutput::Borrowed(ValueRef::Text(text.as_bytes())),
        })
    }
}

/// The amount column may hold text, either written by this store or by
/// another client of the same database file.
impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Real(amount) => Ok(Amount::Number(amount)),
            ValueRef::Integer(amount) => Ok(Amount::Number(amount as f64)),
            ValueRef::Text(text) | ValueRef::Blob(text) => {
                Ok(Amount::Text(String::from_utf8_lossy(text).into_owned()))
            }
            ValueRef::Null => Err(FromSqlError::InvalidType),
        }
    }
}

fn map_row(row: &Row) -> Result<Voucher, rusqlite::Error> {
    Ok(Voucher {
        id: row.get(0)?,
        data: VoucherData {
            voucher_number: row.get(1)?,
            date: row.get(2)?,
            name: row.get(3)?,
            bank: row.get(4)?,
            cheque_number: row.get(5)?,
            amount: row.get(6)?,
            category: row.get(7)?,
            month: row.get(8)?,
            year: row.get(9)?,
        },
    })
}

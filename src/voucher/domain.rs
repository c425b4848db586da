//! Core voucher domain types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Database identifier for a voucher.
pub type VoucherId = i64;

/// The fields of a voucher that the client controls.
///
/// No field is required and none are validated. Missing fields are stored as
/// `NULL` and sent back to the client as `null`. Text fields accept any JSON
/// value and keep its text form, so `"year": 2024` is stored as `"2024"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoucherData {
    /// The number printed on the voucher.
    #[serde(deserialize_with = "deserialize_text")]
    pub voucher_number: Option<String>,
    /// The date as entered by the user, not validated.
    #[serde(deserialize_with = "deserialize_text")]
    pub date: Option<String>,
    /// The payee or payer.
    #[serde(deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    /// The bank the cheque was drawn on.
    #[serde(deserialize_with = "deserialize_text")]
    pub bank: Option<String>,
    /// The cheque number.
    #[serde(deserialize_with = "deserialize_text")]
    pub cheque_number: Option<String>,
    /// The amount paid. There is no currency.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Option<Amount>,
    /// A free text category used for filtering.
    #[serde(deserialize_with = "deserialize_text")]
    pub category: Option<String>,
    /// The month the voucher is filed under, e.g. "January".
    #[serde(deserialize_with = "deserialize_text")]
    pub month: Option<String>,
    /// The year the voucher is filed under, e.g. "2024".
    #[serde(deserialize_with = "deserialize_text")]
    pub year: Option<String>,
}

/// A payment voucher as it is stored, with its generated ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    /// The ID assigned by the store.
    pub id: VoucherId,
    /// Everything else, flattened into the same JSON object as `id`.
    #[serde(flatten)]
    pub data: VoucherData,
}

/// The amount of a voucher.
///
/// Numbers and text that reads as a number are kept as numbers. Anything else
/// is kept as the text the client sent, the way a SQLite `REAL` column keeps
/// text it cannot convert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    /// A numeric amount.
    Number(f64),
    /// Text that is not a number.
    Text(String),
}

impl Amount {
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(number) => Some(match number.as_f64() {
                Some(amount) => Amount::Number(amount),
                None => Amount::Text(number.to_string()),
            }),
            Value::String(text) => Some(Amount::from(text)),
            other => Some(Amount::Text(other.to_string())),
        }
    }
}

impl From<String> for Amount {
    fn from(text: String) -> Self {
        match text.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && !text.trim().is_empty() => Amount::Number(amount),
            _ => Amount::Text(text),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(amount) => write!(f, "{amount}"),
            Amount::Text(text) => f.write_str(text),
        }
    }
}

/// Take any JSON value as text: strings as they are, everything else in its
/// JSON form.
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<Amount>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Amount::from_json(Value::deserialize(deserializer)?))
}

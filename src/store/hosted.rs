//! Voucher store for a hosted database that exposes its tables through a
//! PostgREST style REST interface, such as Supabase.
//!
//! Rows are filtered with query parameters of the form `column=eq.value` and
//! writes ask for the changed rows back with `Prefer: return=representation`,
//! which gives the generated ID on insert and the affected count on update
//! and delete. Reads are paged because the server caps how many rows a single
//! response may hold.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use reqwest::{
    Client, Response,
    header::{AUTHORIZATION, HeaderMap, HeaderValue, InvalidHeaderValue},
};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    Error,
    store::{DistinctField, VOUCHER_TABLE, VoucherStore},
    voucher::{Voucher, VoucherData, VoucherId},
};

const PREFER: &str = "Prefer";
const RETURN_REPRESENTATION: &str = "return=representation";
const PAGE_SIZE: usize = 1000;

/// Creates, retrieves, updates and deletes vouchers through a hosted REST database.
#[derive(Debug, Clone)]
pub struct HostedVoucherStore {
    client: Client,
    table_url: String,
}

/// The error object returned by the REST interface.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl HostedVoucherStore {
    /// Create a store for the project at `url`, authenticating with `key`.
    ///
    /// The key is sent both as the `apikey` header and as a bearer token.
    ///
    /// # Errors
    /// Returns an error if the key cannot be used as a header value or the
    /// HTTP client cannot be created.
    pub fn new(url: &str, key: &str) -> Result<Self, Error> {
        let invalid_key =
            |error: InvalidHeaderValue| Error::Hosted(format!("invalid access key: {error}"));

        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(key).map_err(invalid_key)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {key}")).map_err(invalid_key)?,
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            table_url: format!("{}/rest/v1/{VOUCHER_TABLE}", url.trim_end_matches('/')),
        })
    }

    /// Fetch every row matching `query`, one page at a time.
    ///
    /// A page may come back shorter than [PAGE_SIZE] when the server has a
    /// lower row cap, so only an empty page ends the scan.
    async fn select_all<T: DeserializeOwned>(
        &self,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let mut rows: Vec<T> = Vec::new();

        loop {
            let response = self
                .client
                .get(&self.table_url)
                .query(query)
                .query(&[
                    ("order", "id.asc".to_owned()),
                    ("offset", rows.len().to_string()),
                    ("limit", PAGE_SIZE.to_string()),
                ])
                .send()
                .await?;

            let page: Vec<T> = check_status(response).await?.json().await?;
            if page.is_empty() {
                return Ok(rows);
            }

            rows.extend(page);
        }
    }
}

#[async_trait]
impl VoucherStore for HostedVoucherStore {
    async fn list_by_period(&self, month: &str, year: &str) -> Result<Vec<Voucher>, Error> {
        self.select_all(&[
            ("select", "*".to_owned()),
            ("month", format!("eq.{month}")),
            ("year", format!("eq.{year}")),
        ])
        .await
    }

    async fn create(&self, data: VoucherData) -> Result<Voucher, Error> {
        let response = self
            .client
            .post(&self.table_url)
            .header(PREFER, RETURN_REPRESENTATION)
            .json(&data)
            .send()
            .await?;

        let inserted: Vec<Voucher> = check_status(response).await?.json().await?;

        inserted
            .into_iter()
            .next()
            .ok_or_else(|| Error::Hosted("the insert did not return the new voucher".to_owned()))
    }

    async fn update(&self, id: VoucherId, data: VoucherData) -> Result<u64, Error> {
        let response = self
            .client
            .patch(&self.table_url)
            .query(&[("id", format!("eq.{id}"))])
            .header(PREFER, RETURN_REPRESENTATION)
            .json(&data)
            .send()
            .await?;

        let updated: Vec<Voucher> = check_status(response).await?.json().await?;

        Ok(updated.len() as u64)
    }

    async fn delete(&self, id: VoucherId) -> Result<u64, Error> {
        let response = self
            .client
            .delete(&self.table_url)
            .query(&[("id", format!("eq.{id}"))])
            .header(PREFER, RETURN_REPRESENTATION)
            .send()
            .await?;

        let deleted: Vec<Voucher> = check_status(response).await?.json().await?;

        Ok(deleted.len() as u64)
    }

    async fn distinct_values(&self, field: DistinctField) -> Result<Vec<String>, Error> {
        let column = field.column();
        let rows: Vec<HashMap<String, Option<String>>> = self
            .select_all(&[
                ("select", column.to_owned()),
                (column, "not.is.null".to_owned()),
            ])
            .await?;

        let values: BTreeSet<String> = rows
            .into_iter()
            .filter_map(|mut row| row.remove(column).flatten())
            .filter(|value| !value.is_empty())
            .collect();

        Ok(values.into_iter().collect())
    }

    async fn ping(&self) -> Result<(), Error> {
        let response = self
            .client
            .get(&self.table_url)
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await?;

        check_status(response).await?;

        Ok(())
    }
}

/// Turn a non-success response into an [Error::Hosted] with the backend's message.
async fn check_status(response: Response) -> Result<Response, Error> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(error_body) => error_body.message,
        Err(_) if body.trim().is_empty() => status.to_string(),
        Err(_) => body,
    };

    tracing::error!("The hosted backend responded with {status}: {message}");

    Err(Error::Hosted(message))
}

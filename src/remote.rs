//! Read-only REST collection (PostgREST / Supabase style).
//!
//! Issues a single `GET {url}/rest/v1/{table}?select=*&order=id.asc`.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use tracing::debug;

use crate::db::Entry;
use crate::error::StoreError;
use crate::store::EntryStore;

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body PostgREST sends on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Entry collection served over HTTP.
pub struct RestStore {
    base_url: String,
    api_key: Option<String>,
    table: String,
}

impl RestStore {
    pub fn new(base_url: String, api_key: Option<String>, table: String) -> Self {
        Self {
            base_url,
            api_key,
            table,
        }
    }

    /// Full query URL for the collection.
    pub fn query_url(&self) -> String {
        format!(
            "{}/rest/v1/{}?select=*&order=id.asc",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }
}

impl EntryStore for RestStore {
    fn fetch_all(&mut self) -> Result<Vec<Entry>, StoreError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let mut request = client.get(self.query_url()).header(ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            request = request
                .header("apikey", key)
                .header(AUTHORIZATION, format!("Bearer {key}"));
        }

        debug!(url = %self.query_url(), "querying rest store");
        let response = request
            .send()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        parse_entries(&body)
    }

    fn describe(&self) -> String {
        format!("rest:{}", self.query_url())
    }
}

/// Decode a successful response body.
fn parse_entries(body: &str) -> Result<Vec<Entry>, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Pull a message out of an error body, or fall back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| body.trim().to_string())
}

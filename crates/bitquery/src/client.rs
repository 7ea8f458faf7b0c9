//! Scan execution against the Bitquery streaming API.

use crate::auth::{Credentials, TokenCache};
use crate::error::BitqueryError;
use crate::query::scan_query;
use radar_core::{ScanReading, ScanWindow};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Client for the GraphQL analytics endpoint.
///
/// Owns the token cache; callers only ever see [`ScanReading`]s or a
/// [`BitqueryError`].
pub struct BitqueryClient {
    graphql_url: String,
    tokens: TokenCache,
    client: reqwest::Client,
}

impl BitqueryClient {
    pub const GRAPHQL_URL: &'static str = "https://streaming.bitquery.io/graphql";

    const REQUEST_TIMEOUT_SECS: u64 = 10;

    pub fn new(credentials: Credentials) -> Result<Self, BitqueryError> {
        Self::with_endpoints(credentials, TokenCache::TOKEN_URL, Self::GRAPHQL_URL)
    }

    /// Client against non-default endpoints. Used by tests.
    pub fn with_endpoints(
        credentials: Credentials,
        token_url: impl Into<String>,
        graphql_url: impl Into<String>,
    ) -> Result<Self, BitqueryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            graphql_url: graphql_url.into(),
            tokens: TokenCache::with_token_url(credentials, client.clone(), token_url),
            client,
        })
    }

    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    /// Run the scan query for one window and extract the reading.
    ///
    /// Auth comes first, so a dead token endpoint surfaces as
    /// [`BitqueryError::AuthFailed`] before any analytics traffic happens.
    pub async fn fetch_window(&self, window: &ScanWindow) -> Result<ScanReading, BitqueryError> {
        let token = self.tokens.bearer_token().await?;
        let query = scan_query(window);

        debug!(since = %window.start, "Posting scan query");
        let response = self
            .client
            .post(&self.graphql_url)
            .bearer_auth(token)
            .json(&json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BitqueryError::Status {
                code: status.as_u16(),
                body: snippet(&body),
            });
        }

        parse_scan_response(&body)
    }
}

/// Extract a [`ScanReading`] from a raw GraphQL response body.
///
/// Empty result arrays read as `0.0`; that is the normal shape for a quiet
/// window, not an error. A top-level `errors` array or a missing
/// `data.bitcoin` object is an error.
pub fn parse_scan_response(body: &str) -> Result<ScanReading, BitqueryError> {
    let json: serde_json::Value = serde_json::from_str(body)?;

    if let Some(errors) = json.get("errors").and_then(|e| e.as_array()) {
        if !errors.is_empty() {
            let first = errors
                .first()
                .and_then(|e| e["message"].as_str())
                .unwrap_or("unknown error");
            return Err(BitqueryError::GraphqlErrors(first.to_string()));
        }
    }

    let bitcoin = &json["data"]["bitcoin"];
    if !bitcoin.is_object() {
        return Err(BitqueryError::ParseError(
            "no data.bitcoin object in response".to_string(),
        ));
    }

    let average_inflow = bitcoin["inflow"]
        .as_array()
        .and_then(|rows| rows.first())
        .and_then(|row| row["average"].as_f64())
        .unwrap_or(0.0);

    let old_coin_volume = bitcoin["old_coins"]
        .as_array()
        .and_then(|rows| rows.first())
        .and_then(|row| row["volume"].as_f64())
        .unwrap_or(0.0);

    Ok(ScanReading::new(average_inflow, old_coin_volume))
}

/// First part of a response body, for error messages.
fn snippet(body: &str) -> String {
    const MAX_LEN: usize = 200;
    if body.len() <= MAX_LEN {
        body.trim().to_string()
    } else {
        let cut: String = body.chars().take(MAX_LEN).collect();
        format!("{}...", cut.trim())
    }
}

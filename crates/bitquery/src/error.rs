//! Error types for Bitquery API operations.

use thiserror::Error;

/// Errors that can occur while talking to Bitquery.
///
/// Every variant is recoverable at the scan level: the cycle that hit it is
/// abandoned and the next tick starts clean.
#[derive(Debug, Error)]
pub enum BitqueryError {
    #[error("Token exchange failed: {0}")]
    AuthFailed(String),

    #[error("Analytics request failed: {0}")]
    RequestFailed(String),

    #[error("Analytics API returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("GraphQL error: {0}")]
    GraphqlErrors(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for BitqueryError {
    fn from(err: reqwest::Error) -> Self {
        BitqueryError::RequestFailed(err.to_string())
    }
}

impl From<serde_json::Error> for BitqueryError {
    fn from(err: serde_json::Error) -> Self {
        BitqueryError::ParseError(err.to_string())
    }
}

impl BitqueryError {
    /// Returns true when the failure happened during the token exchange.
    /// These usually mean bad credentials and deserve a louder log line than
    /// a flaky query.
    pub fn is_auth(&self) -> bool {
        matches!(self, BitqueryError::AuthFailed(_))
    }
}

//! OAuth2 client-credentials flow and token caching.

use crate::error::BitqueryError;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{error, info};

/// OAuth2 application credentials issued by Bitquery.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// Bearer token together with its locally computed expiry.
#[derive(Debug, Clone)]
pub struct Token {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Token {
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Strictly before expiry counts as valid; a token at its exact expiry
    /// instant is already stale.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Token endpoint response. Only the fields we read.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Caches one bearer token and refreshes it on demand.
///
/// A valid cached token is handed out without any network traffic. When a
/// refresh fails the slot is cleared, so the next caller starts a fresh
/// exchange instead of reusing a token in an unknown state.
pub struct TokenCache {
    credentials: Credentials,
    token_url: String,
    client: reqwest::Client,
    token: Mutex<Option<Token>>,
}

impl TokenCache {
    pub const TOKEN_URL: &'static str = "https://oauth2.bitquery.io/oauth2/token";

    /// Upstream tokens live 24 hours; expire ours an hour early.
    const TOKEN_LIFETIME_HOURS: i64 = 23;

    pub fn new(credentials: Credentials, client: reqwest::Client) -> Self {
        Self::with_token_url(credentials, client, Self::TOKEN_URL)
    }

    /// Cache pointed at a different token endpoint. Used by tests.
    pub fn with_token_url(
        credentials: Credentials,
        client: reqwest::Client,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            token_url: token_url.into(),
            client,
            token: Mutex::new(None),
        }
    }

    /// Current bearer token, running the client-credentials exchange first
    /// if the cached one is missing or expired.
    pub async fn bearer_token(&self) -> Result<String, BitqueryError> {
        let mut slot = self.token.lock().await;

        if let Some(token) = slot.as_ref() {
            if token.is_valid() {
                return Ok(token.access_token.clone());
            }
        }

        info!("Refreshing Bitquery access token");
        match self.exchange().await {
            Ok(token) => {
                let access_token = token.access_token.clone();
                let expires_at = token.expires_at;
                *slot = Some(token);
                info!(%expires_at, "Token refreshed");
                Ok(access_token)
            }
            Err(e) => {
                *slot = None;
                error!("Token refresh failed: {}", e);
                Err(e)
            }
        }
    }

    /// Whether a non-expired token is currently cached.
    pub async fn has_valid_token(&self) -> bool {
        self.token
            .lock()
            .await
            .as_ref()
            .map(Token::is_valid)
            .unwrap_or(false)
    }

    /// Seed the cache with a known token. Used by tests.
    pub async fn put_token(&self, token: Token) {
        *self.token.lock().await = Some(token);
    }

    /// Snapshot of the cached token, if any. Used by tests.
    pub async fn current_token(&self) -> Option<Token> {
        self.token.lock().await.clone()
    }

    async fn exchange(&self) -> Result<Token, BitqueryError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("scope", "api"),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| BitqueryError::AuthFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BitqueryError::AuthFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| BitqueryError::AuthFailed(e.to_string()))?;

        Ok(Token {
            access_token: body.access_token,
            expires_at: Utc::now() + Duration::hours(Self::TOKEN_LIFETIME_HOURS),
        })
    }
}

//! Application configuration.
//!
//! Everything is read from environment variables once at startup. A missing
//! or malformed variable is fatal; nothing here is reloaded at runtime.

use radar_bitquery::Credentials;
use thiserror::Error;

/// Configuration errors. All of these abort startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct RadarConfig {
    /// Bitquery OAuth2 credentials.
    pub bitquery: Credentials,
    /// Telegram bot token.
    pub telegram_token: String,
    /// Telegram chat that receives alerts.
    pub chat_id: String,
    /// HTTP listen port.
    pub port: u16,
}

impl RadarConfig {
    pub const DEFAULT_PORT: u16 = 10000;

    /// Read configuration from the environment.
    ///
    /// `BITQUERY_ID`, `BITQUERY_SECRET`, `TELEGRAM_TOKEN` and `CHAT_ID` are
    /// required. `PORT` is optional and defaults to 10000.
    pub fn from_env() -> Result<Self, ConfigError> {
        let client_id = require("BITQUERY_ID")?;
        let client_secret = require("BITQUERY_SECRET")?;
        let telegram_token = require("TELEGRAM_TOKEN")?;
        let chat_id = require("CHAT_ID")?;
        let port = parse_port(std::env::var("PORT").ok())?;

        Ok(Self {
            bitquery: Credentials::new(client_id, client_secret),
            telegram_token,
            chat_id,
            port,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

fn parse_port(raw: Option<String>) -> Result<u16, ConfigError> {
    match raw {
        Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidVar {
            name: "PORT",
            value,
        }),
        None => Ok(RadarConfig::DEFAULT_PORT),
    }
}

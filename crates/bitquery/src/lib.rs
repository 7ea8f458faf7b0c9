//! Bitquery API access for the whale radar.
//!
//! This crate owns everything that talks to Bitquery: the OAuth2
//! client-credentials token cache, the GraphQL scan query, and the client
//! that turns one scan window into a [`radar_core::ScanReading`].

pub mod auth;
pub mod client;
pub mod error;
pub mod query;

pub use auth::*;
pub use client::*;
pub use error::*;
pub use query::*;

//! Telegram alerting for the whale radar.
//!
//! This crate provides:
//! - Telegram bot integration for sending alerts
//! - Alert message formatting with severity markers

pub mod notifier;
pub mod telegram;

pub use notifier::{Notifier, NotifierError};
pub use telegram::{format_alert_message, TelegramBot, TelegramError};

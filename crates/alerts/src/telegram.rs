//! Telegram bot wrapper and message formatting.

use radar_core::{AlertMessage, Thresholds};
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("Telegram API error: {0}")]
    Api(#[from] teloxide::RequestError),

    #[error("Invalid Telegram API url: {0}")]
    InvalidApiUrl(String),
}

/// Telegram bot wrapper.
pub struct TelegramBot {
    bot: Bot,
}

impl TelegramBot {
    /// Create a new bot with the given token.
    pub fn new(token: &str) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    /// Bot pointed at a different API server. Used by tests.
    pub fn with_api_url(token: &str, api_url: &str) -> Result<Self, TelegramError> {
        let url = api_url
            .parse()
            .map_err(|_| TelegramError::InvalidApiUrl(api_url.to_string()))?;
        Ok(Self {
            bot: Bot::new(token).set_api_url(url),
        })
    }

    /// Send an alert message to a chat.
    ///
    /// A chat id that does not parse is sent as chat 0, which Telegram
    /// rejects; the resulting API error comes back to the caller like any
    /// other send failure.
    pub async fn send_alert(&self, chat_id: &str, message: &str) -> Result<(), TelegramError> {
        let chat_id: ChatId = ChatId(chat_id.parse().unwrap_or(0));
        self.bot
            .send_message(chat_id, message)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }
}

const SEPARATOR: &str = "──────────────────────";

/// Format a radar alert as an HTML Telegram message.
///
/// Layout: header line, separator, the inflow average, an optional old-coin
/// line (upgraded to a whale alert past the whale threshold), separator, and
/// a dump-risk footer when the inflow is past the dump-risk threshold.
pub fn format_alert_message(message: &AlertMessage, thresholds: &Thresholds) -> String {
    let header = if message.is_test {
        "🧪 <b>RADAR TEST ALERT</b>"
    } else {
        "📡 <b>RADAR DETECTED MOVEMENT</b>"
    };

    let mut msg = format!(
        "{}\n{}\n📊 <b>Exchange Inflow (Avg):</b> {:.2} BTC\n",
        header, SEPARATOR, message.average_inflow
    );

    if thresholds.is_whale_move(message.old_coin_volume) {
        msg.push_str(&format!(
            "💀 <b>WHALE ALERT:</b> {:.0} BTC (3y+ old) moved!\n",
            message.old_coin_volume
        ));
    } else if message.old_coin_volume > 0.0 {
        msg.push_str(&format!(
            "⏳ <b>Old Coins:</b> {:.0} BTC moved.\n",
            message.old_coin_volume
        ));
    }

    msg.push_str(SEPARATOR);

    if thresholds.is_dump_risk(message.average_inflow) {
        msg.push_str("\n🚨 <b>HIGH DUMP RISK</b> 🚨");
    }

    let now = chrono::Utc::now();
    msg.push_str(&format!("\n\n⏰ {}", now.format("%Y-%m-%d %H:%M:%S UTC")));

    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_core::ScanReading;

    fn real_alert(average_inflow: f64, old_coin_volume: f64) -> String {
        let message = AlertMessage::from_reading(ScanReading::new(average_inflow, old_coin_volume));
        format_alert_message(&message, &Thresholds::default())
    }

    #[test]
    fn test_real_alert_header() {
        let msg = real_alert(3.5, 0.0);
        assert!(msg.contains("RADAR DETECTED MOVEMENT"));
        assert!(!msg.contains("TEST ALERT"));
    }

    #[test]
    fn test_test_alert_header() {
        let msg = format_alert_message(&AlertMessage::test(), &Thresholds::default());
        assert!(msg.contains("RADAR TEST ALERT"));
        assert!(!msg.contains("DETECTED MOVEMENT"));
    }

    #[test]
    fn test_inflow_has_two_decimals() {
        let msg = real_alert(3.5, 0.0);
        assert!(msg.contains("3.50 BTC"));
    }

    #[test]
    fn test_zero_volume_has_no_old_coin_line() {
        let msg = real_alert(3.5, 0.0);
        assert!(!msg.contains("Old Coins"));
        assert!(!msg.contains("WHALE ALERT"));
    }

    #[test]
    fn test_moderate_volume_gets_old_coin_line() {
        let msg = real_alert(0.5, 120.0);
        assert!(msg.contains("Old Coins:</b> 120 BTC moved."));
        assert!(!msg.contains("WHALE ALERT"));
    }

    #[test]
    fn test_whale_volume_upgrades_line() {
        let msg = real_alert(0.5, 600.0);
        assert!(msg.contains("WHALE ALERT:</b> 600 BTC (3y+ old) moved!"));
        assert!(!msg.contains("Old Coins"));
    }

    #[test]
    fn test_whale_boundary_stays_moderate() {
        // Exactly on the whale threshold renders as an ordinary move.
        let msg = real_alert(0.5, 500.0);
        assert!(msg.contains("Old Coins:</b> 500 BTC moved."));
        assert!(!msg.contains("WHALE ALERT"));
    }

    #[test]
    fn test_dump_risk_footer() {
        assert!(real_alert(5.5, 0.0).contains("HIGH DUMP RISK"));
        assert!(!real_alert(5.0, 0.0).contains("HIGH DUMP RISK"));
        assert!(!real_alert(3.5, 0.0).contains("HIGH DUMP RISK"));
    }

    #[test]
    fn test_test_alert_carries_no_markers() {
        let msg = format_alert_message(&AlertMessage::test(), &Thresholds::default());
        assert!(msg.contains("0.00 BTC"));
        assert!(!msg.contains("Old Coins"));
        assert!(!msg.contains("HIGH DUMP RISK"));
    }
}

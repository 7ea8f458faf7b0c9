//! Alert notification logic.

use crate::telegram::{format_alert_message, TelegramBot};
use radar_core::{AlertMessage, Thresholds};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Telegram error: {0}")]
    Telegram(#[from] crate::telegram::TelegramError),
}

/// Sends radar alerts to the single configured Telegram chat.
///
/// Sending is fire-and-forget from the scan's point of view: callers log a
/// returned error and move on, they never re-send within the same cycle.
pub struct Notifier {
    bot: Arc<TelegramBot>,
    chat_id: String,
    thresholds: Thresholds,
}

impl Notifier {
    pub fn new(bot: Arc<TelegramBot>, chat_id: impl Into<String>, thresholds: Thresholds) -> Self {
        Self {
            bot,
            chat_id: chat_id.into(),
            thresholds,
        }
    }

    /// Format and send one alert.
    pub async fn send_alert(&self, message: &AlertMessage) -> Result<(), NotifierError> {
        let text = format_alert_message(message, &self.thresholds);
        self.bot.send_alert(&self.chat_id, &text).await?;
        info!(
            chat_id = %self.chat_id,
            is_test = message.is_test,
            "Alert sent"
        );
        Ok(())
    }

    /// Send a manual test alert with zeroed metrics.
    pub async fn send_test(&self) -> Result<(), NotifierError> {
        self.send_alert(&AlertMessage::test()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_core::ScanReading;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::sync::oneshot;

    /// Connecting to an unused local port fails immediately.
    const DEAD_API_URL: &str = "http://127.0.0.1:1/";

    /// Canned Bot API success payload for `sendMessage`.
    const SEND_MESSAGE_OK: &str = concat!(
        r#"{"ok":true,"result":{"message_id":1,"#,
        r#""from":{"id":123456,"is_bot":true,"first_name":"radar","username":"radar_bot"},"#,
        r#""chat":{"id":42,"first_name":"radar","type":"private"},"#,
        r#""date":1700000000,"text":"ok"}}"#
    );

    /// Local stand-in for the Bot API: accepts one request, hands its raw
    /// bytes to the test through the channel, and answers with a canned
    /// `sendMessage` success.
    async fn capture_telegram_server() -> (SocketAddr, oneshot::Receiver<String>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let _ = tx.send(String::from_utf8_lossy(&buf[..n]).to_string());
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    SEND_MESSAGE_OK.len(),
                    SEND_MESSAGE_OK
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        (addr, rx)
    }

    #[test]
    fn test_notifier_holds_chat_id() {
        let bot = Arc::new(TelegramBot::new("123456:test-token"));
        let notifier = Notifier::new(bot, "42", Thresholds::default());
        assert_eq!(notifier.chat_id, "42");
    }

    #[tokio::test]
    async fn test_send_test_delivers_test_alert_to_api() {
        let (addr, request) = capture_telegram_server().await;
        let bot = Arc::new(
            TelegramBot::with_api_url("123456:test-token", &format!("http://{}/", addr))
                .expect("bot"),
        );
        let notifier = Notifier::new(bot, "42", Thresholds::default());

        notifier.send_test().await.expect("send succeeds");

        let request = request.await.expect("request captured");
        assert!(request.contains("RADAR TEST ALERT"));
        assert!(request.contains("HTML"));
    }

    #[tokio::test]
    async fn test_send_failure_surfaces_error() {
        let bot =
            Arc::new(TelegramBot::with_api_url("123456:test-token", DEAD_API_URL).expect("bot"));
        let notifier = Notifier::new(bot, "42", Thresholds::default());

        let message = AlertMessage::from_reading(ScanReading::new(5.0, 250.0));
        let result = notifier.send_alert(&message).await;
        assert!(matches!(result, Err(NotifierError::Telegram(_))));
    }
}

//! Periodic scan loop.
//!
//! One cycle: build a window covering the last scan interval, fetch the
//! on-chain reading for it, check thresholds and notify. Every failure is
//! absorbed at the cycle boundary so the loop itself never dies; the next
//! tick starts from a clean slate.

use crate::state::SharedState;
use radar_alerts::Notifier;
use radar_bitquery::BitqueryClient;
use radar_core::{AlertMessage, ScanWindow, Thresholds};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Minutes between scans. Each scan window covers exactly this span.
pub const SCAN_INTERVAL_MINUTES: i64 = 10;

/// Drives the fetch-evaluate-notify cycle.
pub struct Scanner {
    client: Arc<BitqueryClient>,
    notifier: Arc<Notifier>,
    state: SharedState,
    thresholds: Thresholds,
}

impl Scanner {
    pub fn new(client: Arc<BitqueryClient>, notifier: Arc<Notifier>, state: SharedState) -> Self {
        Self {
            client,
            notifier,
            state,
            thresholds: Thresholds::default(),
        }
    }

    /// Run scans until the running flag clears.
    ///
    /// The first scan fires immediately so a fresh deploy reports its health
    /// right away; later scans follow the fixed interval.
    pub async fn run(&self) {
        info!(
            "Starting scan loop (every {} minutes)",
            SCAN_INTERVAL_MINUTES
        );

        while self.state.is_running() {
            self.scan_once().await;

            // Check every second if we should stop, but only scan per interval
            for _ in 0..(SCAN_INTERVAL_MINUTES as u64 * 60) {
                if !self.state.is_running() {
                    break;
                }
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }

        info!("Scan loop stopped");
    }

    /// Execute one full cycle. Errors are logged and counted, never returned.
    pub async fn scan_once(&self) {
        let window = ScanWindow::ending_now(SCAN_INTERVAL_MINUTES);

        let reading = match self.client.fetch_window(&window).await {
            Ok(reading) => reading,
            Err(e) if e.is_auth() => {
                error!("Scan aborted, Bitquery authentication failed: {}", e);
                self.state.stats.record_scan_failure();
                return;
            }
            Err(e) => {
                warn!("Scan failed: {}", e);
                self.state.stats.record_scan_failure();
                return;
            }
        };

        info!(
            "Scan result - inflow avg {:.2} BTC, old volume {:.2} BTC",
            reading.average_inflow, reading.old_coin_volume
        );
        self.state.record_reading(reading).await;

        if self.thresholds.should_alert(&reading) {
            match self
                .notifier
                .send_alert(&AlertMessage::from_reading(reading))
                .await
            {
                Ok(()) => self.state.stats.record_alert(),
                Err(e) => warn!("Failed to deliver alert: {}", e),
            }
        }
    }
}

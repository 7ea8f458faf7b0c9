//! Application state management.

use chrono::{DateTime, Utc};
use radar_core::ScanReading;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Statistics for the radar.
#[derive(Debug, Default)]
pub struct RadarStats {
    /// Number of scan cycles that produced a reading.
    pub scans_completed: AtomicU64,
    /// Number of scan cycles that failed.
    pub scans_failed: AtomicU64,
    /// Number of alerts delivered to Telegram.
    pub alerts_sent: AtomicU64,
    /// Start time in milliseconds.
    pub started_at_ms: AtomicU64,
}

impl RadarStats {
    pub fn new() -> Self {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;

        Self {
            started_at_ms: AtomicU64::new(now),
            ..Default::default()
        }
    }

    pub fn record_scan(&self) {
        self.scans_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_scan_failure(&self) {
        self.scans_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_alert(&self) {
        self.alerts_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime_secs(&self) -> u64 {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        (now - self.started_at_ms.load(Ordering::Relaxed)) / 1000
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            scans_completed: self.scans_completed.load(Ordering::Relaxed),
            scans_failed: self.scans_failed.load(Ordering::Relaxed),
            alerts_sent: self.alerts_sent.load(Ordering::Relaxed),
            uptime_secs: self.uptime_secs(),
        }
    }
}

/// Summary of statistics.
#[derive(Debug, Clone)]
pub struct StatsSummary {
    pub scans_completed: u64,
    pub scans_failed: u64,
    pub alerts_sent: u64,
    pub uptime_secs: u64,
}

/// The most recent successful reading, with the wall-clock time it landed.
#[derive(Debug, Clone, Copy)]
pub struct LastScan {
    pub reading: ScanReading,
    pub at: DateTime<Utc>,
}

/// Application state shared across components.
pub struct AppState {
    /// Radar statistics.
    pub stats: RadarStats,
    /// Running flag.
    pub running: AtomicBool,
    /// Most recent successful scan.
    pub last_scan: RwLock<Option<LastScan>>,
}

impl AppState {
    /// Create new application state.
    pub fn new() -> Self {
        Self {
            stats: RadarStats::new(),
            running: AtomicBool::new(false),
            last_scan: RwLock::new(None),
        }
    }

    /// Start the radar.
    pub fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    /// Stop the radar.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Check if running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Store a successful reading and bump the scan counter.
    pub async fn record_reading(&self, reading: ScanReading) {
        let mut stored = self.last_scan.write().await;
        *stored = Some(LastScan {
            reading,
            at: Utc::now(),
        });
        self.stats.record_scan();
    }

    /// Get the most recent successful scan.
    pub async fn last_scan(&self) -> Option<LastScan> {
        *self.last_scan.read().await
    }

    /// Get statistics summary.
    pub fn stats_summary(&self) -> StatsSummary {
        self.stats.summary()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared state handle.
pub type SharedState = Arc<AppState>;

/// Create shared state.
pub fn create_state() -> SharedState {
    Arc::new(AppState::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_radar_stats_new() {
        let stats = RadarStats::new();
        assert_eq!(stats.scans_completed.load(Ordering::Relaxed), 0);
        assert!(stats.started_at_ms.load(Ordering::Relaxed) > 0);
    }

    #[test]
    fn test_radar_stats_record() {
        let stats = RadarStats::new();
        stats.record_scan();
        stats.record_scan();
        assert_eq!(stats.scans_completed.load(Ordering::Relaxed), 2);

        stats.record_scan_failure();
        assert_eq!(stats.scans_failed.load(Ordering::Relaxed), 1);

        stats.record_alert();
        assert_eq!(stats.alerts_sent.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_stats_summary() {
        let stats = RadarStats::new();
        stats.record_scan();
        stats.record_alert();

        let summary = stats.summary();
        assert_eq!(summary.scans_completed, 1);
        assert_eq!(summary.alerts_sent, 1);
        assert_eq!(summary.scans_failed, 0);
    }

    #[tokio::test]
    async fn test_app_state_start_stop() {
        let state = AppState::new();
        assert!(!state.is_running());

        state.start();
        assert!(state.is_running());

        state.stop();
        assert!(!state.is_running());
    }

    #[tokio::test]
    async fn test_record_reading_updates_last_scan() {
        let state = create_state();
        assert!(state.last_scan().await.is_none());

        state.record_reading(ScanReading::new(3.2, 120.0)).await;

        let last = state.last_scan().await.expect("reading stored");
        assert_eq!(last.reading, ScanReading::new(3.2, 120.0));
        assert_eq!(state.stats_summary().scans_completed, 1);
    }
}

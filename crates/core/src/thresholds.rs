//! Trigger policy for scan readings.

use crate::ScanReading;
use serde::{Deserialize, Serialize};

/// Alert trigger thresholds, all denominated in BTC.
///
/// The primary pair decides whether an alert fires at all; the secondary pair
/// only upgrades the severity wording of a message that already fired.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Thresholds {
    /// Primary: average exchange inflow above this triggers an alert.
    pub inflow_avg_btc: f64,
    /// Primary: old-coin volume above this triggers an alert.
    pub old_volume_btc: f64,
    /// Severity: inflow above this marks the alert as high dump risk.
    pub dump_risk_btc: f64,
    /// Severity: old-coin volume above this marks a whale move.
    pub whale_volume_btc: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            inflow_avg_btc: 2.0,
            old_volume_btc: 100.0,
            dump_risk_btc: 5.0,
            whale_volume_btc: 500.0,
        }
    }
}

impl Thresholds {
    /// Whether a reading warrants an alert.
    ///
    /// Either primary threshold is sufficient on its own, and comparison is
    /// strictly greater than: a reading sitting exactly on a threshold stays
    /// quiet.
    pub fn should_alert(&self, reading: &ScanReading) -> bool {
        self.exceeds_inflow(reading.average_inflow)
            || self.exceeds_old_volume(reading.old_coin_volume)
    }

    pub fn exceeds_inflow(&self, average_inflow: f64) -> bool {
        average_inflow > self.inflow_avg_btc
    }

    pub fn exceeds_old_volume(&self, old_coin_volume: f64) -> bool {
        old_coin_volume > self.old_volume_btc
    }

    pub fn is_dump_risk(&self, average_inflow: f64) -> bool {
        average_inflow > self.dump_risk_btc
    }

    pub fn is_whale_move(&self, old_coin_volume: f64) -> bool {
        old_coin_volume > self.whale_volume_btc
    }
}

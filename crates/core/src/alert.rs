//! Alert payload handed to the notifier.

use crate::ScanReading;
use serde::{Deserialize, Serialize};

/// Everything the notifier needs to render one Telegram message.
///
/// Built once per triggered alert (or manual test) and passed by value; the
/// notifier never reaches back into scan state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertMessage {
    pub average_inflow: f64,
    pub old_coin_volume: f64,
    /// Manual test alerts render with a distinguishing header.
    pub is_test: bool,
}

impl AlertMessage {
    /// Real alert for a reading that crossed a threshold.
    pub fn from_reading(reading: ScanReading) -> Self {
        Self {
            average_inflow: reading.average_inflow,
            old_coin_volume: reading.old_coin_volume,
            is_test: false,
        }
    }

    /// Manual test alert with zeroed metrics.
    pub fn test() -> Self {
        Self {
            average_inflow: 0.0,
            old_coin_volume: 0.0,
            is_test: true,
        }
    }
}

//! Aggregates extracted from one scan of the analytics API.

use serde::{Deserialize, Serialize};

/// On-chain aggregates for a single scan window.
///
/// Both values default to `0.0` when the API returns no rows for the window,
/// so a quiet chain reads the same as an empty result set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanReading {
    /// Average value (BTC) of the largest exchange-bound transaction in the window.
    pub average_inflow: f64,
    /// Total value (BTC) of coins older than three years moved in the window.
    pub old_coin_volume: f64,
}

impl ScanReading {
    pub fn new(average_inflow: f64, old_coin_volume: f64) -> Self {
        Self {
            average_inflow,
            old_coin_volume,
        }
    }

    /// Reading for a window where nothing matched either query.
    pub fn quiet() -> Self {
        Self::new(0.0, 0.0)
    }
}

//! Time window covered by a single scan.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Half-open time range a scan asks the analytics API about.
///
/// A window is computed fresh for every scan from the current clock and is
/// never reused across cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ScanWindow {
    /// Window of `minutes` length ending at `end`.
    pub fn ending_at(end: DateTime<Utc>, minutes: i64) -> Self {
        Self {
            start: end - Duration::minutes(minutes),
            end,
        }
    }

    /// Window of `minutes` length ending at the current instant.
    pub fn ending_now(minutes: i64) -> Self {
        Self::ending_at(Utc::now(), minutes)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

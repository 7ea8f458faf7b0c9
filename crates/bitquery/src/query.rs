//! GraphQL document construction for the scan query.

use chrono::{DateTime, Utc};
use radar_core::ScanWindow;

/// Timestamp layout the analytics API expects in `date.after` filters.
/// Always UTC, second precision, no fractional part.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Minimum input age, in days, for a spend to count as an old coin.
const OLD_COIN_AGE_DAYS: u32 = 1095;

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Build the scan document for one window.
///
/// Two selections over the Bitcoin dataset: the single highest-value
/// transaction into exchange-annotated addresses since the window start
/// (reported as an average with a row count), and the summed value of
/// inputs older than [`OLD_COIN_AGE_DAYS`] spent in the same range.
///
/// The document shape is fixed; only the window timestamp varies, so the
/// same window always produces the same bytes.
pub fn scan_query(window: &ScanWindow) -> String {
    let since = format_timestamp(window.start);
    format!(
        r#"{{
  bitcoin {{
    inflow: transactions(
      options: {{desc: "value", limit: 1}}
      date: {{after: "{since}"}}
      outputAddress: {{annotation: "Exchange"}}
    ) {{
      average: value(calculate: average)
      count
    }}
    old_coins: inputs(
      age: {{gt: {age}}}
      date: {{after: "{since}"}}
    ) {{
      volume: value(calculate: sum)
    }}
  }}
}}"#,
        since = since,
        age = OLD_COIN_AGE_DAYS,
    )
}

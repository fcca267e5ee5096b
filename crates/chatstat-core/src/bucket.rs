//! Timestamp truncation into bucket labels

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Truncation applied to a timestamp before it is used as a grouping key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Hour,
    Minute,
    Second,
}

impl Granularity {
    pub fn format(&self) -> &'static str {
        match self {
            Granularity::Day => "%Y-%m-%d",
            Granularity::Hour => "%Y-%m-%d %H:00:00",
            Granularity::Minute => "%Y-%m-%d %H:%M:00",
            Granularity::Second => "%Y-%m-%d %H:%M:%S",
        }
    }
}

/// UTC time of an epoch-millisecond timestamp; out-of-range values clamp to the epoch
pub fn to_datetime(timestamp_ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(timestamp_ms).unwrap_or_default()
}

pub fn bucket_label(timestamp_ms: i64, granularity: Granularity) -> String {
    to_datetime(timestamp_ms)
        .format(granularity.format())
        .to_string()
}

//! Timestamp rendering shared by stores and views

use chrono::{DateTime, Utc};

/// Layout of every timestamp the API renders. Always UTC.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

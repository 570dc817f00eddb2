//! Timestamps as they appear in the yr.no feed.
//!
//! The feed writes local wall-clock times without an offset, e.g.
//! `2024-03-01T09:30:00`. They are interpreted in the system timezone.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, de::Error as _};

use crate::error::{Result, WoozyError};

/// Format shared by element text and attribute values.
pub const FEED_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a feed timestamp as a local instant.
pub fn parse_local(value: &str) -> Result<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), FEED_TIME_FORMAT).map_err(|e| {
        WoozyError::Timestamp {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })?;

    // Ambiguous wall times (DST fall-back) resolve to the earlier instant.
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| WoozyError::Timestamp {
            value: value.to_string(),
            reason: "time does not exist in the local timezone".to_string(),
        })
}

/// Decode a timestamp held in an element's text, e.g. `<lastupdate>..</lastupdate>`.
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_local(&text).map_err(D::Error::custom)
}

/// Decode a timestamp held in an attribute, e.g. `<time from="..">`.
pub fn deserialize_attr<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_local(&value).map_err(D::Error::custom)
}

/// Like [`deserialize_attr`] for attributes the feed may leave out.
/// Pair with `#[serde(default)]` so a missing attribute becomes `None`.
pub fn deserialize_attr_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Local>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_attr(deserializer).map(Some)
}

//! Wire timestamps
//!
//! Idea timestamps only feed the "edited" flag, so decoding never fails on
//! them: naive ISO-8601 and RFC 3339 (offset or `Z`) are both accepted, and
//! anything else decodes as absent.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Parse a naive or offset ISO-8601 timestamp; offset forms are normalized to UTC
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_utc());
    }
    raw.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => {
            let parsed = parse_timestamp(&raw);
            if parsed.is_none() {
                debug!(timestamp = %raw, "ignoring unparseable timestamp");
            }
            parsed
        }
        Some(other) => {
            debug!(timestamp = %other, "ignoring non-string timestamp");
            None
        }
    };
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 3, 2)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn accepts_naive_forms() {
        assert_eq!(parse_timestamp("2017-03-02T19:56:51"), Some(at(19, 56, 51)));
        assert_eq!(parse_timestamp("2017-03-02 19:56:51"), Some(at(19, 56, 51)));
        assert!(parse_timestamp("2017-03-02T19:56:51.123456").is_some());
    }

    #[test]
    fn normalizes_offset_forms_to_utc() {
        assert_eq!(parse_timestamp("2017-03-02T19:56:51Z"), Some(at(19, 56, 51)));
        assert_eq!(parse_timestamp("2017-03-02T21:56:51+02:00"), Some(at(19, 56, 51)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("last tuesday"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}

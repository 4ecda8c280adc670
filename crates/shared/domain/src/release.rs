//! Serde adapter for lesson release timestamps.
//!
//! Accepts RFC 3339 (`2025-12-05T20:00:00-03:00`) or a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
//! timestamp, which is read as UTC. Always serializes as RFC 3339.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses a release timestamp in either accepted form.
#[must_use]
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc)).ok().or_else(|| {
        NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT).ok().map(|naive| naive.and_utc())
    })
}

#[allow(clippy::ref_option)]
pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse(&raw)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid release timestamp: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn naive_timestamp_is_utc() {
        let parsed = parse("2025-12-05T20:00:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 12, 5, 20, 0, 0).unwrap());
    }

    #[test]
    fn offset_timestamp_is_normalized() {
        let parsed = parse("2025-12-05T20:00:00-03:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 12, 5, 23, 0, 0).unwrap());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse("next tuesday").is_none());
        assert!(parse("2025-13-01T00:00:00").is_none());
    }
}

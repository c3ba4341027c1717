//! # Instant Parsing
//!
//! The GraphQL service hands out instants as ISO-8601 strings produced by
//! different writers (browser `toISOString`, Python `isoformat`, plain
//! dates). All of them are interpreted as UTC instants here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Offset-less date-time layouts accepted after RFC 3339 fails.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 instant.
///
/// Accepts, in order:
/// - RFC 3339 with an offset (`2024-01-05T10:00:00.000Z`, `...+05:30`)
/// - a date-time without offset, read as UTC
/// - a bare date, read as UTC midnight
///
/// Returns `None` for anything else, including the empty string.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serde adapter for an optional `[start, end]` instant pair.
///
/// Missing, short, or unparseable arrays deserialize to `None` rather than
/// failing the whole record.
pub mod period {
    use super::*;

    pub fn serialize<S>(
        value: &Option<(DateTime<Utc>, DateTime<Utc>)>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some((start, end)) => {
                serializer.collect_seq([start.to_rfc3339(), end.to_rfc3339()])
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
        let Some(values) = raw else {
            return Ok(None);
        };

        let mut instants = values
            .iter()
            .map(|v| v.as_deref().and_then(parse_instant));
        match (instants.next(), instants.next()) {
            (Some(Some(start)), Some(Some(end))) => Ok(Some((start, end))),
            _ => Ok(None),
        }
    }
}

//! Timestamp model.
//!
//! # Design
//!
//! Every fix carries an absolute instant.  Inputs arrive as ISO-8601 strings
//! with either an explicit offset (`2024-05-01T10:00:00+05:30`, `...Z`) or no
//! offset at all (`2024-05-01 10:00:00`).  Strings without an offset are read
//! as UTC so that all instants share one timeline and subtraction is always
//! defined.
//!
//! Internally everything is `DateTime<Utc>`; the original offset is not kept.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::{CoreError, CoreResult};

/// An absolute instant.
pub type Timestamp = DateTime<Utc>;

/// Offset-carrying layouts tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Layouts without an offset; parsed as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp with an explicit or implied (UTC) offset.
pub fn parse_timestamp(input: &str) -> CoreResult<Timestamp> {
    let s = input.trim();
    if s.is_empty() {
        return Err(CoreError::Timestamp {
            input:  input.to_owned(),
            reason: "empty".into(),
        });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }

    Err(CoreError::Timestamp {
        input:  input.to_owned(),
        reason: "not an ISO-8601 date-time".into(),
    })
}

/// Render `ts` as RFC 3339 in UTC (`Z` suffix), keeping sub-second digits
/// only when present.
pub fn format_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Signed seconds from `earlier` to `later`, millisecond precision.
///
/// Negative when the inputs are out of order.
#[inline]
pub fn elapsed_secs(earlier: Timestamp, later: Timestamp) -> f64 {
    (later - earlier).num_milliseconds() as f64 / 1_000.0
}

//! Timestamp interpretation and formatting.
//!
//! The metrics endpoint reports instants either as epoch milliseconds or as
//! ISO-8601 strings. Two renderings exist: the compact UTC form used in the
//! watermark table and the full ISO-8601 instant used for the last-updated
//! indicator.

use serde::Serialize;
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Shown wherever a timestamp (or other optional value) is missing.
pub const PLACEHOLDER: &str = "—";

const TABLE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const ISO_INSTANT_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

/// An instant as delivered by the metrics endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch.
    Millis(f64),
    /// An ISO-8601 / RFC 3339 string.
    Text(String),
}

impl Timestamp {
    /// Returns true for values that count as "no timestamp": zero, NaN and
    /// the empty string. Epoch zero is deliberately indistinguishable from
    /// absence.
    pub fn is_falsy(&self) -> bool {
        match self {
            Timestamp::Millis(ms) => *ms == 0.0 || ms.is_nan(),
            Timestamp::Text(s) => s.is_empty(),
        }
    }

    /// Interpret the value as a UTC instant.
    ///
    /// Returns `None` for falsy values and for anything that cannot be
    /// represented (non-finite, out of range, unparseable text).
    pub fn to_utc(&self) -> Option<OffsetDateTime> {
        if self.is_falsy() {
            return None;
        }
        let instant = match self {
            Timestamp::Millis(ms) => millis_to_datetime(*ms)?,
            Timestamp::Text(s) => parse_text(s.trim())?,
        };
        // Normalise any parsed offset to UTC without risking a panic at the
        // edges of the supported range.
        OffsetDateTime::from_unix_timestamp_nanos(instant.unix_timestamp_nanos()).ok()
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Timestamp::Millis(ms as f64)
    }
}

impl From<&str> for Timestamp {
    fn from(s: &str) -> Self {
        Timestamp::Text(s.to_string())
    }
}

fn millis_to_datetime(ms: f64) -> Option<OffsetDateTime> {
    if !ms.is_finite() {
        return None;
    }
    let nanos = (ms.trunc() as i128).checked_mul(1_000_000)?;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
}

/// Accepts RFC 3339, general ISO-8601 with offset, offset-less date-times
/// (taken as UTC) and bare dates (UTC midnight).
fn parse_text(s: &str) -> Option<OffsetDateTime> {
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(dt);
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Iso8601::DEFAULT) {
        return Some(dt);
    }
    if let Ok(dt) = PrimitiveDateTime::parse(s, &Iso8601::DEFAULT) {
        return Some(dt.assume_utc());
    }
    Date::parse(s, &Iso8601::DEFAULT)
        .ok()
        .map(|d| d.midnight().assume_utc())
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS` in UTC.
///
/// Missing, falsy or uninterpretable values yield [`PLACEHOLDER`].
pub fn format_timestamp(ts: Option<&Timestamp>) -> String {
    format_with(ts, TABLE_FORMAT)
}

/// Format a timestamp as a full ISO-8601 instant (`2024-01-15T09:05:03.000Z`).
///
/// Used for the last-updated indicator; missing values yield [`PLACEHOLDER`].
pub fn format_iso_instant(ts: Option<&Timestamp>) -> String {
    format_with(ts, ISO_INSTANT_FORMAT)
}

fn format_with(ts: Option<&Timestamp>, format: &[BorrowedFormatItem<'_>]) -> String {
    ts.and_then(Timestamp::to_utc)
        .and_then(|dt| dt.format(format).ok())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2024-01-15T09:05:03Z
    const SAMPLE_MS: i64 = 1_705_309_503_000;

    #[test]
    fn test_format_missing_is_placeholder() {
        assert_eq!(format_timestamp(None), "—");
    }

    #[test]
    fn test_format_zero_is_placeholder() {
        assert_eq!(format_timestamp(Some(&Timestamp::Millis(0.0))), "—");
        assert_eq!(format_timestamp(Some(&Timestamp::from(0))), "—");
    }

    #[test]
    fn test_format_empty_string_is_placeholder() {
        assert_eq!(format_timestamp(Some(&Timestamp::from(""))), "—");
    }

    #[test]
    fn test_format_epoch_millis() {
        let ts = Timestamp::from(SAMPLE_MS);
        assert_eq!(format_timestamp(Some(&ts)), "2024-01-15 09:05:03");
    }

    #[test]
    fn test_format_truncates_sub_second_millis() {
        let ts = Timestamp::Millis(SAMPLE_MS as f64 + 999.9);
        assert_eq!(format_timestamp(Some(&ts)), "2024-01-15 09:05:03");
    }

    #[test]
    fn test_format_iso_string_uses_utc_fields() {
        let ts = Timestamp::from("2024-01-15T11:05:03+02:00");
        assert_eq!(format_timestamp(Some(&ts)), "2024-01-15 09:05:03");

        let ts = Timestamp::from("2024-01-15T09:05:03.123456789Z");
        assert_eq!(format_timestamp(Some(&ts)), "2024-01-15 09:05:03");
    }

    #[test]
    fn test_format_offsetless_and_date_only_strings() {
        let ts = Timestamp::from("2024-01-15T09:05:03");
        assert_eq!(format_timestamp(Some(&ts)), "2024-01-15 09:05:03");

        let ts = Timestamp::from("2024-01-15");
        assert_eq!(format_timestamp(Some(&ts)), "2024-01-15 00:00:00");
    }

    #[test]
    fn test_format_zero_pads_components() {
        // 0987-06-05T04:03:02Z
        let ts = Timestamp::from("0987-06-05T04:03:02Z");
        assert_eq!(format_timestamp(Some(&ts)), "0987-06-05 04:03:02");
    }

    #[test]
    fn test_format_pre_epoch_millis() {
        let ts = Timestamp::from(-1_000);
        assert_eq!(format_timestamp(Some(&ts)), "1969-12-31 23:59:59");
    }

    #[test]
    fn test_format_garbage_is_placeholder() {
        assert_eq!(format_timestamp(Some(&Timestamp::from("yesterday"))), "—");
        assert_eq!(format_timestamp(Some(&Timestamp::Millis(f64::INFINITY))), "—");
        assert_eq!(format_timestamp(Some(&Timestamp::Millis(f64::NAN))), "—");
        assert_eq!(format_timestamp(Some(&Timestamp::Millis(1e300))), "—");
    }

    #[test]
    fn test_iso_instant_millis() {
        let ts = Timestamp::from(SAMPLE_MS + 42);
        assert_eq!(format_iso_instant(Some(&ts)), "2024-01-15T09:05:03.042Z");
    }

    #[test]
    fn test_iso_instant_from_offset_string() {
        let ts = Timestamp::from("2024-01-15T10:05:03.5+01:00");
        assert_eq!(format_iso_instant(Some(&ts)), "2024-01-15T09:05:03.500Z");
    }

    #[test]
    fn test_iso_instant_missing_is_placeholder() {
        assert_eq!(format_iso_instant(None), "—");
        assert_eq!(format_iso_instant(Some(&Timestamp::from(0))), "—");
    }

    #[test]
    fn test_is_falsy() {
        assert!(Timestamp::Millis(0.0).is_falsy());
        assert!(Timestamp::Millis(-0.0).is_falsy());
        assert!(Timestamp::from("").is_falsy());
        assert!(!Timestamp::from(1).is_falsy());
        assert!(!Timestamp::from("x").is_falsy());
    }
}

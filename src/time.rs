//! Timestamp helpers for store records and entities.
//!
//! Store records carry ISO-8601 strings; entities carry `DateTime<Utc>`.
//! Parsing is lenient about offsets and fractional seconds and also
//! accepts the offset-less forms some records were written with.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Parses an ISO-8601 timestamp into UTC.
///
/// Offset-less values are read as UTC; a bare date is midnight UTC.
///
/// # Examples
///
/// ```
/// use hub_domain::time::parse_timestamp;
///
/// assert!(parse_timestamp("2024-05-01T13:00:00.000Z").is_some());
/// assert!(parse_timestamp("2024-05-01 13:00:00").is_some());
/// assert!(parse_timestamp("next tuesday").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Formats a timestamp the way store records expect (RFC 3339, millis, `Z`).
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_timestamp("2024-05-01T09:00:00-04:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_offsetless_forms() {
        let expected = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2023-01-01T00:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-01-01 00:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-01-01"), Some(expected));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2023-13-45").is_none());
    }

    #[test]
    fn test_format_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap();
        assert_eq!(format_timestamp(at), "2024-05-01T13:00:00.000Z");
        assert_eq!(parse_timestamp(&format_timestamp(at)), Some(at));
    }
}

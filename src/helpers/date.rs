//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a front-matter date string in the formats authors commonly use
///
/// The result is only used for ordering, so timezone offsets are folded
/// into UTC and date-only values land at midnight.
///
/// # Examples
/// ```ignore
/// parse_date_string("2024-01-15")          // -> 2024-01-15 00:00:00
/// parse_date_string("2024/01/15 10:30")    // -> 2024-01-15 10:30:00
/// parse_date_string("2024-01-15T10:30:00Z") // -> 2024-01-15 10:30:00
/// ```
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.naive_utc());
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_date_only() {
        assert_eq!(
            parse_date_string("2024-01-15"),
            Some(ymd_hms(2024, 1, 15, 0, 0, 0))
        );
        assert_eq!(
            parse_date_string("2024/01/15"),
            Some(ymd_hms(2024, 1, 15, 0, 0, 0))
        );
    }

    #[test]
    fn test_parse_datetime() {
        assert_eq!(
            parse_date_string("2024-01-15 10:30:00"),
            Some(ymd_hms(2024, 1, 15, 10, 30, 0))
        );
        assert_eq!(
            parse_date_string("2024-01-15T10:30"),
            Some(ymd_hms(2024, 1, 15, 10, 30, 0))
        );
    }

    #[test]
    fn test_parse_rfc3339_folds_offset() {
        assert_eq!(
            parse_date_string("2024-01-15T10:30:00+02:00"),
            Some(ymd_hms(2024, 1, 15, 8, 30, 0))
        );
        assert_eq!(
            parse_date_string("2024-01-15T10:30:00Z"),
            Some(ymd_hms(2024, 1, 15, 10, 30, 0))
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_date_string(""), None);
        assert_eq!(parse_date_string("someday"), None);
        assert_eq!(parse_date_string("2024-13-45"), None);
    }
}

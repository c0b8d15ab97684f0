//! Calendar date parsing shared by classification and validation.

use chrono::{DateTime, NaiveDate};

/// Parse a calendar date as it arrives from forms or stored documents.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps (the UTC date is kept).
/// Returns `None` for blank or unparseable input; callers decide whether that
/// means "no date" or a field error.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_utc().date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_dates() {
        assert_eq!(
            parse_calendar_date("2026-10-22"),
            NaiveDate::from_ymd_opt(2026, 10, 22)
        );
    }

    #[test]
    fn parses_timestamps_as_utc_dates() {
        assert_eq!(
            parse_calendar_date("2026-10-22T23:30:00-03:00"),
            NaiveDate::from_ymd_opt(2026, 10, 23)
        );
    }

    #[test]
    fn blank_and_garbage_are_none() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("   "), None);
        assert_eq!(parse_calendar_date("22/10/2026"), None);
        assert_eq!(parse_calendar_date("2026-02-30"), None);
    }
}

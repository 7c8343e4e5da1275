use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

/// Wire format of custom range bounds, in the client's local timezone.
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("timestamp cannot be empty")]
    Empty,
    #[error("invalid date")]
    InvalidDate,
    #[error("invalid datetime format: expected YYYY-MM-DDTHH:MM")]
    InvalidDateTime,
    #[error("local time does not exist: {0}")]
    NonexistentLocalTime(String),
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Formats an instant as `YYYY-MM-DDTHH:MM` in local time, dropping seconds.
pub fn format_local_datetime(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&Local)
        .format(LOCAL_DATETIME_FORMAT)
        .to_string()
}

pub fn format_millis_local(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(instant) => instant
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => millis.to_string(),
    }
}

/// Parses a local date-time bound into epoch milliseconds. A bare date is
/// read as UTC midnight, like an ISO date-only string.
pub fn parse_local_datetime_millis(input: &str) -> Result<i64, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let naive = date
            .and_hms_opt(0, 0, 0)
            .ok_or(TimeParseError::InvalidDate)?;
        return Ok(naive.and_utc().timestamp_millis());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return local_to_utc_millis(dt);
        }
    }

    Err(TimeParseError::InvalidDateTime)
}

// Repeated wall-clock times (DST fall-back) take the earlier instant.
fn local_to_utc_millis(naive: NaiveDateTime) -> Result<i64, TimeParseError> {
    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| TimeParseError::NonexistentLocalTime(naive.to_string()))?;
    Ok(local.with_timezone(&Utc).timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::{format_local_datetime, parse_local_datetime_millis, TimeParseError};
    use chrono::{Local, TimeZone, Utc};

    #[test]
    fn format_local_datetime_matches_local_time() {
        let instant = Utc.with_ymd_and_hms(2025, 11, 27, 5, 53, 18).unwrap();
        let expected = instant.with_timezone(&Local).format("%Y-%m-%dT%H:%M");
        assert_eq!(format_local_datetime(instant), expected.to_string());
    }

    #[test]
    fn parse_accepts_wire_format() {
        let millis = parse_local_datetime_millis("2030-01-15T13:45").unwrap();
        let expected = Local.with_ymd_and_hms(2030, 1, 15, 13, 45, 0).unwrap();
        assert_eq!(millis, expected.timestamp_millis());
    }

    #[test]
    fn parse_accepts_seconds_and_space() {
        let millis = parse_local_datetime_millis("2030-01-15 13:45:10").unwrap();
        let expected = Local.with_ymd_and_hms(2030, 1, 15, 13, 45, 10).unwrap();
        assert_eq!(millis, expected.timestamp_millis());
    }

    #[test]
    fn parse_reads_bare_date_as_utc_midnight() {
        let millis = parse_local_datetime_millis("2030-01-15").unwrap();
        let expected = Utc.with_ymd_and_hms(2030, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(millis, expected.timestamp_millis());
    }

    #[test]
    fn parse_rejects_empty_and_garbage() {
        assert_eq!(
            parse_local_datetime_millis("  ").unwrap_err(),
            TimeParseError::Empty
        );
        assert_eq!(
            parse_local_datetime_millis("yesterday").unwrap_err(),
            TimeParseError::InvalidDateTime
        );
    }

    #[test]
    fn format_then_parse_keeps_the_minute() {
        let instant = Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 45).unwrap();
        let formatted = format_local_datetime(instant);
        let millis = parse_local_datetime_millis(&formatted).unwrap();
        assert_eq!(millis, instant.timestamp_millis() - 45_000);
    }
}

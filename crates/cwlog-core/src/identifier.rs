use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use thiserror::Error;

/// Digits needed for `YYYYMMDDhhmmss`.
pub const TIMESTAMP_DIGITS: usize = 14;
pub const WINDOW_BEFORE_MINUTES: i64 = 5;
pub const WINDOW_AFTER_MINUTES: i64 = 60;

const MIN_YEAR: u32 = 2000;
const MAX_YEAR: u32 = 2100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier needs at least 14 digits, found {0}")]
    TooFewDigits(usize),
    #[error("invalid year: {0}")]
    InvalidYear(u32),
    #[error("invalid month: {0}")]
    InvalidMonth(u32),
    #[error("invalid day: {0}")]
    InvalidDay(u32),
    #[error("invalid hour: {0}")]
    InvalidHour(u32),
    #[error("invalid minute: {0}")]
    InvalidMinute(u32),
    #[error("invalid second: {0}")]
    InvalidSecond(u32),
}

/// A trace identifier resolved to its UTC instant and the search window
/// around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TridWindow {
    pub timestamp: DateTime<Utc>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

impl TridWindow {
    fn around(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            window_start: timestamp - Duration::minutes(WINDOW_BEFORE_MINUTES),
            window_end: timestamp + Duration::minutes(WINDOW_AFTER_MINUTES),
        }
    }
}

/// Parses identifiers such as `20251125091033515637` or
/// `20251127055818922907:Nw6SpN`.
///
/// Everything after the first `:` is ignored, non-digits are dropped, and
/// the first fourteen digits are read as `YYYYMMDDhhmmss` in UTC. The day is
/// only checked against `1..=31`; a day past the end of its month rolls into
/// the following month.
pub fn parse_identifier(raw: &str) -> Result<TridWindow, IdentifierError> {
    let head = match raw.split_once(':') {
        Some((head, _suffix)) => head,
        None => raw,
    };

    let digits: Vec<u32> = head.chars().filter_map(|ch| ch.to_digit(10)).collect();
    if digits.len() < TIMESTAMP_DIGITS {
        return Err(IdentifierError::TooFewDigits(digits.len()));
    }

    let field = |start: usize, len: usize| {
        digits[start..start + len]
            .iter()
            .fold(0u32, |acc, digit| acc * 10 + digit)
    };

    let year = field(0, 4);
    let month = field(4, 2);
    let day = field(6, 2);
    let hour = field(8, 2);
    let minute = field(10, 2);
    let second = field(12, 2);

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(IdentifierError::InvalidYear(year));
    }
    if !(1..=12).contains(&month) {
        return Err(IdentifierError::InvalidMonth(month));
    }
    if !(1..=31).contains(&day) {
        return Err(IdentifierError::InvalidDay(day));
    }
    if hour > 23 {
        return Err(IdentifierError::InvalidHour(hour));
    }
    if minute > 59 {
        return Err(IdentifierError::InvalidMinute(minute));
    }
    if second > 59 {
        return Err(IdentifierError::InvalidSecond(second));
    }

    let first_of_month = NaiveDate::from_ymd_opt(year as i32, month, 1)
        .ok_or(IdentifierError::InvalidMonth(month))?;
    let date = first_of_month + Duration::days(i64::from(day) - 1);
    let time =
        NaiveTime::from_hms_opt(hour, minute, second).ok_or(IdentifierError::InvalidHour(hour))?;
    let timestamp = Utc.from_utc_datetime(&date.and_time(time));

    Ok(TridWindow::around(timestamp))
}

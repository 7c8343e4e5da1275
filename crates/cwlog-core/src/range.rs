use serde::{Deserialize, Serialize};

use crate::preset::{find_preset, CUSTOM_PRESET};
use crate::time::{now_millis, parse_local_datetime_millis, TimeParseError};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Absolute query range in epoch milliseconds. `start <= end` is not
/// enforced for custom ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeOutcome {
    Resolved(DateRange),
    Unset,
    InvalidBound { value: String, error: TimeParseError },
}

impl RangeOutcome {
    pub fn range(&self) -> Option<DateRange> {
        match self {
            RangeOutcome::Resolved(range) => Some(*range),
            _ => None,
        }
    }
}

pub fn resolve_range(preset: &str, custom_start: &str, custom_end: &str) -> Option<DateRange> {
    resolve_range_at(preset, custom_start, custom_end, now_millis()).range()
}

/// Resolves against an explicit clock. Preset ranges end at `now_millis`.
pub fn resolve_range_at(
    preset: &str,
    custom_start: &str,
    custom_end: &str,
    now_millis: i64,
) -> RangeOutcome {
    if preset == CUSTOM_PRESET {
        if custom_start.is_empty() || custom_end.is_empty() {
            return RangeOutcome::Unset;
        }
        let start = match parse_bound(custom_start) {
            Ok(start) => start,
            Err(outcome) => return outcome,
        };
        let end = match parse_bound(custom_end) {
            Ok(end) => end,
            Err(outcome) => return outcome,
        };
        return RangeOutcome::Resolved(DateRange { start, end });
    }

    match find_preset(preset).and_then(|p| p.minutes_ago) {
        Some(minutes) => RangeOutcome::Resolved(DateRange {
            start: now_millis - minutes * MILLIS_PER_MINUTE,
            end: now_millis,
        }),
        None => RangeOutcome::Unset,
    }
}

fn parse_bound(value: &str) -> Result<i64, RangeOutcome> {
    parse_local_datetime_millis(value).map_err(|error| RangeOutcome::InvalidBound {
        value: value.to_string(),
        error,
    })
}

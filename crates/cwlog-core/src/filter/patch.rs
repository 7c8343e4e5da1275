use crate::identifier::{parse_identifier, IdentifierError, TridWindow};
use crate::time::format_local_datetime;

/// One user-level change to the filter inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPatch {
    SearchQuery(String),
    DatePreset(String),
    StartDate(String),
    EndDate(String),
    ToggleCaseSensitive,
    ToggleUseRegex,
    Identifier {
        trid_query: String,
        start_date: String,
        end_date: String,
    },
    Reset,
}

/// A parsed identifier together with the patch that applies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierPatch {
    pub window: TridWindow,
    pub patch: FilterPatch,
}

impl FilterPatch {
    /// Builds the patch for an identifier search: the trimmed input becomes
    /// the identifier query and the window becomes a custom range in local
    /// time.
    pub fn from_identifier(raw: &str) -> Result<IdentifierPatch, IdentifierError> {
        let window = parse_identifier(raw)?;
        let patch = FilterPatch::Identifier {
            trid_query: raw.trim().to_string(),
            start_date: format_local_datetime(window.window_start),
            end_date: format_local_datetime(window.window_end),
        };
        Ok(IdentifierPatch { window, patch })
    }
}

#[cfg(test)]
mod tests {
    use super::FilterPatch;
    use crate::identifier::IdentifierError;
    use chrono::{Local, TimeZone, Utc};

    #[test]
    fn identifier_patch_uses_local_window() {
        let parsed = FilterPatch::from_identifier("  20251127055818922907:Nw6SpN ").unwrap();
        let start = Utc
            .with_ymd_and_hms(2025, 11, 27, 5, 53, 18)
            .unwrap()
            .with_timezone(&Local)
            .format("%Y-%m-%dT%H:%M")
            .to_string();
        let end = Utc
            .with_ymd_and_hms(2025, 11, 27, 6, 58, 18)
            .unwrap()
            .with_timezone(&Local)
            .format("%Y-%m-%dT%H:%M")
            .to_string();
        assert_eq!(
            parsed.patch,
            FilterPatch::Identifier {
                trid_query: "20251127055818922907:Nw6SpN".to_string(),
                start_date: start,
                end_date: end,
            }
        );
    }

    #[test]
    fn identifier_patch_propagates_parse_error() {
        let err = FilterPatch::from_identifier("abc").unwrap_err();
        assert_eq!(err, IdentifierError::TooFewDigits(0));
    }
}

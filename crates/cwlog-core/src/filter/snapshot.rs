use serde::{Deserialize, Deserializer, Serialize};

use crate::filter::FilterPatch;
use crate::pattern::build_pattern;
use crate::preset::{CUSTOM_PRESET, DEFAULT_PRESET};
use crate::query::QueryDescriptor;
use crate::range::{resolve_range_at, DateRange, RangeOutcome};
use crate::time::now_millis;

/// Complete filter inputs. This is the value that gets persisted.
///
/// Missing or `null` fields fall back to their defaults when deserializing,
/// so older or partial snapshots still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSnapshot {
    #[serde(deserialize_with = "null_as_default")]
    pub search_query: String,
    #[serde(deserialize_with = "null_as_default")]
    pub trid_query: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_preset: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub case_sensitive: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub use_regex: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for FilterSnapshot {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            trid_query: String::new(),
            date_preset: DEFAULT_PRESET.to_string(),
            start_date: String::new(),
            end_date: String::new(),
            case_sensitive: false,
            use_regex: false,
        }
    }
}

impl FilterSnapshot {
    /// Replaces an empty preset with the default one.
    pub fn normalized(mut self) -> Self {
        if self.date_preset.is_empty() {
            self.date_preset = DEFAULT_PRESET.to_string();
        }
        self
    }

    /// Returns the snapshot that results from `patch`.
    ///
    /// A non-custom preset clears both bounds; editing a bound switches the
    /// preset to custom.
    pub fn apply(&self, patch: FilterPatch) -> FilterSnapshot {
        let mut next = self.clone();
        match patch {
            FilterPatch::SearchQuery(value) => next.search_query = value,
            FilterPatch::DatePreset(value) => {
                if value != CUSTOM_PRESET {
                    next.start_date.clear();
                    next.end_date.clear();
                }
                next.date_preset = value;
            }
            FilterPatch::StartDate(value) => {
                next.start_date = value;
                next.force_custom();
            }
            FilterPatch::EndDate(value) => {
                next.end_date = value;
                next.force_custom();
            }
            FilterPatch::ToggleCaseSensitive => next.case_sensitive = !next.case_sensitive,
            FilterPatch::ToggleUseRegex => next.use_regex = !next.use_regex,
            FilterPatch::Identifier {
                trid_query,
                start_date,
                end_date,
            } => {
                next.trid_query = trid_query;
                next.date_preset = CUSTOM_PRESET.to_string();
                next.start_date = start_date;
                next.end_date = end_date;
            }
            FilterPatch::Reset => next = FilterSnapshot::default(),
        }
        next
    }

    fn force_custom(&mut self) {
        if self.date_preset != CUSTOM_PRESET {
            self.date_preset = CUSTOM_PRESET.to_string();
        }
    }

    /// True when any query or range input differs from the defaults. The
    /// case and regex flags are not counted.
    pub fn is_active(&self) -> bool {
        !self.search_query.is_empty()
            || !self.trid_query.is_empty()
            || self.date_preset != DEFAULT_PRESET
            || !self.start_date.is_empty()
            || !self.end_date.is_empty()
    }

    pub fn range_outcome_at(&self, now_millis: i64) -> RangeOutcome {
        resolve_range_at(
            &self.date_preset,
            &self.start_date,
            &self.end_date,
            now_millis,
        )
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.range_outcome_at(now_millis()).range()
    }

    pub fn cloudwatch_pattern(&self) -> Option<String> {
        build_pattern(&self.trid_query, &self.search_query, self.use_regex)
    }

    pub fn query_at(&self, now_millis: i64) -> Option<QueryDescriptor> {
        let range = self.range_outcome_at(now_millis).range()?;
        Some(QueryDescriptor::new(
            range,
            self.cloudwatch_pattern(),
            self.case_sensitive,
        ))
    }
}

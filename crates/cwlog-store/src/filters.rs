use std::sync::Arc;

use cwlog_core::time::now_millis;
use cwlog_core::{
    DateRange, Diagnostic, DiagnosticSink, FilterPatch, FilterSnapshot, QueryDescriptor,
    RangeOutcome,
};

use crate::persist::Persistence;

pub const FILTERS_KEY: &str = "filters";

type Listener = Box<dyn FnMut(&FilterSnapshot)>;

/// Holds the current filter snapshot for a session.
///
/// `update` swaps in the next snapshot and notifies listeners; `commit`
/// writes the current snapshot to storage. The `set_*`/`toggle_*` methods
/// do both.
pub struct FilterState {
    snapshot: FilterSnapshot,
    persistence: Persistence,
    listeners: Vec<Listener>,
}

impl FilterState {
    /// Hydrates from storage, falling back to defaults.
    pub fn load(persistence: Persistence) -> Self {
        let snapshot = persistence
            .load::<FilterSnapshot>(FILTERS_KEY)
            .map(FilterSnapshot::normalized)
            .unwrap_or_default();
        Self {
            snapshot,
            persistence,
            listeners: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> &FilterSnapshot {
        &self.snapshot
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    fn sink(&self) -> &Arc<dyn DiagnosticSink> {
        self.persistence.sink()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FilterSnapshot) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Applies `patch` without touching storage. Listeners only hear about
    /// snapshots that actually changed.
    pub fn update(&mut self, patch: FilterPatch) -> &FilterSnapshot {
        let next = self.snapshot.apply(patch);
        if next != self.snapshot {
            self.snapshot = next;
            for listener in &mut self.listeners {
                listener(&self.snapshot);
            }
        }
        &self.snapshot
    }

    pub fn commit(&self) {
        self.persistence.save(FILTERS_KEY, &self.snapshot);
    }

    fn dispatch(&mut self, patch: FilterPatch) {
        self.update(patch);
        self.commit();
    }

    pub fn set_search_query(&mut self, value: impl Into<String>) {
        self.dispatch(FilterPatch::SearchQuery(value.into()));
    }

    pub fn set_date_preset(&mut self, value: impl Into<String>) {
        self.dispatch(FilterPatch::DatePreset(value.into()));
    }

    pub fn set_start_date(&mut self, value: impl Into<String>) {
        self.dispatch(FilterPatch::StartDate(value.into()));
    }

    pub fn set_end_date(&mut self, value: impl Into<String>) {
        self.dispatch(FilterPatch::EndDate(value.into()));
    }

    pub fn toggle_case_sensitive(&mut self) {
        self.dispatch(FilterPatch::ToggleCaseSensitive);
    }

    pub fn toggle_use_regex(&mut self) {
        self.dispatch(FilterPatch::ToggleUseRegex);
    }

    pub fn reset(&mut self) {
        self.dispatch(FilterPatch::Reset);
    }

    /// Searches by trace identifier: stores the trimmed input and switches
    /// to the identifier's time window. Returns false and changes nothing
    /// when the identifier does not parse.
    pub fn set_from_identifier(&mut self, raw: &str) -> bool {
        match FilterPatch::from_identifier(raw) {
            Ok(parsed) => {
                self.sink().report(Diagnostic::IdentifierParsed {
                    raw: raw.to_string(),
                    timestamp: parsed.window.timestamp,
                    window_start: parsed.window.window_start,
                    window_end: parsed.window.window_end,
                });
                self.dispatch(parsed.patch);
                true
            }
            Err(error) => {
                self.sink().report(Diagnostic::IdentifierRejected {
                    raw: raw.to_string(),
                    error,
                });
                false
            }
        }
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range_at(now_millis())
    }

    pub fn date_range_at(&self, now_millis: i64) -> Option<DateRange> {
        let outcome = self.snapshot.range_outcome_at(now_millis);
        if let RangeOutcome::InvalidBound { value, error } = &outcome {
            self.sink().report(Diagnostic::CustomBoundInvalid {
                value: value.clone(),
                error: error.clone(),
            });
        }
        outcome.range()
    }

    pub fn cloudwatch_pattern(&self) -> Option<String> {
        self.snapshot.cloudwatch_pattern()
    }

    pub fn case_sensitive(&self) -> bool {
        self.snapshot.case_sensitive
    }

    pub fn is_active(&self) -> bool {
        self.snapshot.is_active()
    }

    pub fn query(&self) -> Option<QueryDescriptor> {
        self.query_at(now_millis())
    }

    pub fn query_at(&self, now_millis: i64) -> Option<QueryDescriptor> {
        let range = self.date_range_at(now_millis)?;
        Some(QueryDescriptor::new(
            range,
            self.cloudwatch_pattern(),
            self.case_sensitive(),
        ))
    }
}

pub mod diagnostics;
pub mod filter;
pub mod identifier;
pub mod pattern;
pub mod preset;
pub mod query;
pub mod range;
pub mod time;

pub use diagnostics::{Diagnostic, DiagnosticSink, RecordingSink, TracingSink};
pub use filter::{FilterPatch, FilterSnapshot, IdentifierPatch};
pub use identifier::{parse_identifier, IdentifierError, TridWindow};
pub use pattern::{build_pattern, escape_literal};
pub use preset::{find_preset, DatePreset, CUSTOM_PRESET, DATE_PRESETS, DEFAULT_PRESET};
pub use query::QueryDescriptor;
pub use range::{resolve_range, resolve_range_at, DateRange, RangeOutcome};
pub use time::TimeParseError;

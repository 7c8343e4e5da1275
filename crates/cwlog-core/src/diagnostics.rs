use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::identifier::IdentifierError;
use crate::time::TimeParseError;

/// Non-fatal events reported while parsing identifiers, resolving ranges,
/// and moving snapshots in and out of storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    IdentifierParsed {
        raw: String,
        timestamp: DateTime<Utc>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    },
    IdentifierRejected {
        raw: String,
        error: IdentifierError,
    },
    CustomBoundInvalid {
        value: String,
        error: TimeParseError,
    },
    SnapshotMissing {
        key: String,
    },
    SnapshotLoadFailed {
        key: String,
        reason: String,
    },
    SnapshotSaveFailed {
        key: String,
        reason: String,
    },
}

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::IdentifierParsed {
                raw,
                timestamp,
                window_start,
                window_end,
            } => debug!(
                identifier = %raw,
                timestamp = %timestamp.to_rfc3339(),
                window_start = %window_start.to_rfc3339(),
                window_end = %window_end.to_rfc3339(),
                "identifier parsed"
            ),
            Diagnostic::IdentifierRejected { raw, error } => {
                warn!(identifier = %raw, error = %error, "identifier rejected")
            }
            Diagnostic::CustomBoundInvalid { value, error } => {
                warn!(value = %value, error = %error, "custom range bound ignored")
            }
            Diagnostic::SnapshotMissing { key } => {
                debug!(key = %key, "no saved snapshot, using defaults")
            }
            Diagnostic::SnapshotLoadFailed { key, reason } => {
                warn!(key = %key, reason = %reason, "failed to load snapshot, using defaults")
            }
            Diagnostic::SnapshotSaveFailed { key, reason } => {
                warn!(key = %key, reason = %reason, "failed to save snapshot")
            }
        }
    }
}

/// Keeps every reported diagnostic in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::{Diagnostic, DiagnosticSink, RecordingSink, TracingSink};

    #[test]
    fn recording_sink_keeps_order_and_drains() {
        let sink = RecordingSink::new();
        sink.report(Diagnostic::SnapshotMissing {
            key: "filters".to_string(),
        });
        sink.report(Diagnostic::SnapshotSaveFailed {
            key: "filters".to_string(),
            reason: "disk full".to_string(),
        });
        assert_eq!(sink.events().len(), 2);
        let drained = sink.take();
        assert!(matches!(drained[0], Diagnostic::SnapshotMissing { .. }));
        assert!(sink.events().is_empty());
    }

    #[test]
    fn tracing_sink_accepts_every_event() {
        TracingSink.report(Diagnostic::SnapshotLoadFailed {
            key: "filters".to_string(),
            reason: "expected value".to_string(),
        });
    }
}

use std::sync::Arc;

use cwlog_core::{Diagnostic, DiagnosticSink};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::kv::KeyValueStore;

/// JSON snapshots in and out of a key-value store.
///
/// Failures never reach the caller: loads degrade to `None` and saves are
/// dropped, both reported to the diagnostic sink. Without a store every
/// call is skipped.
pub struct Persistence {
    store: Option<Box<dyn KeyValueStore>>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Persistence {
    pub fn new(store: impl KeyValueStore + 'static, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            store: Some(Box::new(store)),
            sink,
        }
    }

    pub fn unavailable(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { store: None, sink }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    pub fn sink(&self) -> &Arc<dyn DiagnosticSink> {
        &self.sink
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let store = self.store.as_ref()?;
        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.sink.report(Diagnostic::SnapshotMissing {
                    key: key.to_string(),
                });
                return None;
            }
            Err(err) => {
                self.report_load_failure(key, err.to_string());
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                self.report_load_failure(key, err.to_string());
                None
            }
        }
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        if let Err(err) = write_json(&**store, key, value) {
            self.sink.report(Diagnostic::SnapshotSaveFailed {
                key: key.to_string(),
                reason: err.to_string(),
            });
        }
    }

    fn report_load_failure(&self, key: &str, reason: String) {
        self.sink.report(Diagnostic::SnapshotLoadFailed {
            key: key.to_string(),
            reason,
        });
    }
}

fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

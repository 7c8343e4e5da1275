use std::path::PathBuf;
use std::sync::Arc;

use cwlog_core::DiagnosticSink;
use tracing::debug;

use crate::error::Result;
use crate::filters::FilterState;
use crate::kv::{FileStore, MemoryStore};
use crate::persist::Persistence;

/// Where a session keeps its snapshots.
#[derive(Debug, Clone)]
pub enum Storage {
    Dir(PathBuf),
    Memory(MemoryStore),
    Disabled,
}

/// Per-session context handed to everything that reads or edits filters.
pub struct Session {
    filters: FilterState,
}

impl Session {
    pub fn open(storage: Storage, sink: Arc<dyn DiagnosticSink>) -> Result<Self> {
        let persistence = match storage {
            Storage::Dir(dir) => {
                let store = FileStore::open(&dir)?;
                debug!(path = %dir.display(), "file storage opened");
                Persistence::new(store, sink)
            }
            Storage::Memory(store) => Persistence::new(store, sink),
            Storage::Disabled => {
                debug!("storage disabled, filters will not persist");
                Persistence::unavailable(sink)
            }
        };
        Ok(Self {
            filters: FilterState::load(persistence),
        })
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }
}

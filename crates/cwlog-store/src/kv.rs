use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Result, StoreError};
use crate::paths::ensure_dir;

/// String key-value storage behind the persistence adapter.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: &Path) -> Result<Self> {
        ensure_dir(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{FileStore, KeyValueStore, MemoryStore};
    use crate::error::StoreErrorKind;
    use tempfile::TempDir;

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.set("filters", "{}").unwrap();
        assert_eq!(handle.get("filters").unwrap().as_deref(), Some("{}"));
        assert_eq!(handle.len(), 1);
        assert!(handle.get("settings").unwrap().is_none());
    }

    #[test]
    fn file_store_reads_back_what_it_wrote() {
        let temp = TempDir::new().expect("tempdir");
        let store = FileStore::open(&temp.path().join("data")).expect("open");
        assert!(store.get("filters").unwrap().is_none());
        store.set("filters", r#"{"searchQuery":"x"}"#).unwrap();
        store.set("filters", r#"{"searchQuery":"y"}"#).unwrap();
        assert_eq!(
            store.get("filters").unwrap().as_deref(),
            Some(r#"{"searchQuery":"y"}"#)
        );
        assert!(store.dir().join("filters.json").is_file());
        assert!(!store.dir().join("filters.json.tmp").exists());
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let temp = TempDir::new().expect("tempdir");
        let store = FileStore::open(temp.path()).expect("open");
        let err = store.set("../escape", "{}").unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::InvalidKey);
        assert_eq!(store.get("").unwrap_err().kind(), StoreErrorKind::InvalidKey);
    }
}

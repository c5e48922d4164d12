//! Storage adapter trait and implementations.
//!
//! The adapter persists the store as one JSON document. Any key-value
//! backend satisfying this contract will do; the two implementations here
//! cover tests/simulation (in-memory) and single-device durability (a file).

use crate::error::Result;
use dse_core::SyncState;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

/// The persisted shape of the whole store: entity type -> bookkeeping
/// record. Ordered so the serialized document is stable.
pub type StoreSnapshot = BTreeMap<String, SyncState>;

/// Seam to the durable substrate.
///
/// `load` returns `None` when nothing has ever been saved - distinct from
/// an empty snapshot, though the store treats both as a fresh start.
pub trait StorageAdapter {
    /// Read the persisted snapshot, if any.
    fn load(&self) -> Result<Option<StoreSnapshot>>;

    /// Replace the persisted snapshot.
    fn save(&self, snapshot: &StoreSnapshot) -> Result<()>;

    /// Drop the persisted snapshot entirely.
    fn clear(&self) -> Result<()>;
}

/// In-memory adapter for tests and simulation.
///
/// Stores the serialized document rather than the typed snapshot, so the
/// full serialization path is exercised exactly as a real backend would.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw persisted document, as a backend would hold it.
    pub fn document(&self) -> Option<String> {
        self.document.lock().clone()
    }
}

impl StorageAdapter for MemoryStorage {
    fn load(&self) -> Result<Option<StoreSnapshot>> {
        let guard = self.document.lock();
        match guard.as_deref() {
            Some(document) => Ok(Some(serde_json::from_str(document)?)),
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        *self.document.lock() = Some(serde_json::to_string(snapshot)?);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.document.lock() = None;
        Ok(())
    }
}

/// File-backed adapter: the whole store as one JSON file, rewritten on
/// every save.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StorageAdapter for FileStorage {
    fn load(&self) -> Result<Option<StoreSnapshot>> {
        match std::fs::read_to_string(&self.path) {
            Ok(document) => Ok(Some(serde_json::from_str(&document)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let document = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, document)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot_with(entity_type: &str) -> StoreSnapshot {
        let mut data = dse_core::StateMap::new();
        data.insert("count".to_string(), json!(5));
        let mut snapshot = StoreSnapshot::new();
        snapshot.insert(entity_type.to_string(), SyncState::new(data));
        snapshot
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_none());

        let snapshot = snapshot_with("crew");
        storage.save(&snapshot).unwrap();
        assert_eq!(storage.load().unwrap(), Some(snapshot));

        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_memory_storage_persists_one_document() {
        let storage = MemoryStorage::new();
        storage.save(&snapshot_with("crew")).unwrap();
        let document = storage.document().unwrap();
        assert!(document.starts_with('{'));
        assert!(document.contains("\"crew\""));
    }
}

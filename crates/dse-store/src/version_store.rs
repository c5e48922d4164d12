//! The version store: source of truth for per-entity-type sync state.

use crate::adapter::{StorageAdapter, StoreSnapshot};
use crate::error::Result;
use dse_core::{now_millis, StateMap, SyncState};
use serde::Serialize;
use tracing::debug;

/// Aggregate diagnostics over the store, computed on demand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of entity types with a record.
    pub entity_types: usize,
    /// The entity type names, sorted.
    pub entity_type_names: Vec<String>,
    /// Serialized size of all state data, in bytes.
    pub total_size_bytes: usize,
    /// Least-recent successful sync across all records, epoch millis.
    pub oldest_sync: Option<u64>,
}

/// Durable mapping from entity type to its last known
/// `{version, data, last_sync}` record.
///
/// The snapshot is loaded eagerly at construction and the whole document is
/// rewritten on every commit; records are replaced atomically, never
/// partially written. One instance per process is the expected lifecycle.
/// Callers in multi-threaded hosts must serialize access per entity type -
/// commit is read-modify-write over the whole document.
pub struct VersionStore<S: StorageAdapter> {
    adapter: S,
    entries: StoreSnapshot,
}

impl<S: StorageAdapter> VersionStore<S> {
    /// Open the store, loading whatever the adapter has persisted.
    pub fn open(adapter: S) -> Result<Self> {
        let entries = adapter.load()?.unwrap_or_default();
        debug!(entity_types = entries.len(), "version store loaded");
        Ok(Self { adapter, entries })
    }

    /// The record for an entity type. Absence means "full sync required".
    pub fn get(&self, entity_type: &str) -> Option<&SyncState> {
        self.entries.get(entity_type)
    }

    /// Install first-ever state for an entity type with a fresh version.
    ///
    /// Always succeeds (short of adapter failure), replacing any existing
    /// record.
    pub fn set_initial_state(&mut self, entity_type: &str, data: StateMap) -> Result<SyncState> {
        let record = SyncState::new(data);
        self.entries.insert(entity_type.to_string(), record.clone());
        self.flush()?;
        debug!(entity_type, version = %record.version, "initial state installed");
        Ok(record)
    }

    /// Atomically replace the record for an entity type.
    pub fn commit(&mut self, entity_type: &str, version: impl Into<String>, data: StateMap) -> Result<()> {
        let record = SyncState {
            version: version.into(),
            last_sync: now_millis(),
            data,
        };
        debug!(entity_type, version = %record.version, "committing record");
        self.entries.insert(entity_type.to_string(), record);
        self.flush()
    }

    /// Current version id for an entity type.
    pub fn get_version(&self, entity_type: &str) -> Option<&str> {
        self.entries.get(entity_type).map(|record| record.version.as_str())
    }

    /// Time of last successful sync for an entity type, epoch millis.
    pub fn get_last_sync(&self, entity_type: &str) -> Option<u64> {
        self.entries.get(entity_type).map(|record| record.last_sync)
    }

    /// Aggregate diagnostics. Nothing is cached; cheap at the volumes the
    /// store is built for.
    pub fn stats(&self) -> StoreStats {
        let total_size_bytes = self
            .entries
            .values()
            .map(|record| serde_json::to_string(&record.data).map(|s| s.len()).unwrap_or(0))
            .sum();
        StoreStats {
            entity_types: self.entries.len(),
            entity_type_names: self.entries.keys().cloned().collect(),
            total_size_bytes,
            oldest_sync: self.entries.values().map(|record| record.last_sync).min(),
        }
    }

    /// Wipe the store, in memory and in the adapter.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.adapter.clear()
    }

    /// Number of entity types tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any entity type is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn flush(&self) -> Result<()> {
        self.adapter.save(&self.entries)
    }
}

//! The delta sync facade.

use crate::error::Result;
use dse_core::{fresh_version, now_millis, DeltaPacket, StateMap, SyncState};
use dse_digest::checksum;
use dse_store::{StorageAdapter, StoreStats, VersionStore};
use parking_lot::Mutex;
use tracing::{debug, warn};

/// Coordinates diffing, patching, checksumming and version bookkeeping for
/// all entity types on one device.
///
/// Each entity type is either uninitialized (no record - every operation
/// reports "full sync required") or synced; operations are atomic from the
/// caller's perspective, so there is no in-between state. A single mutex
/// serializes store access: commits are read-modify-write over the whole
/// persisted document, and call frequency is low.
///
/// Construct one per process and share it; tests build isolated instances
/// over their own adapters.
pub struct DeltaSyncService<S: StorageAdapter> {
    store: Mutex<VersionStore<S>>,
}

impl<S: StorageAdapter> DeltaSyncService<S> {
    /// Wrap an already-opened store.
    pub fn new(store: VersionStore<S>) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Open the store behind `adapter` and wrap it.
    pub fn open(adapter: S) -> Result<Self> {
        Ok(Self::new(VersionStore::open(adapter)?))
    }

    /// Produce a delta packet moving `entity_type` to `new_data`.
    ///
    /// Returns `Ok(None)` when there is nothing to send: either no prior
    /// state exists (the caller must full-sync first) or `new_data` equals
    /// the stored state (no spurious empty packets).
    ///
    /// On success the local store is advanced to the packet's target
    /// version before the packet is ever transmitted - the sender is
    /// authoritative for its own outgoing state and does not wait for peer
    /// acknowledgement. Acknowledged delivery, if needed, is a transport
    /// concern.
    pub fn create_delta_packet(&self, entity_type: &str, new_data: &StateMap) -> Result<Option<DeltaPacket>> {
        let mut store = self.store.lock();

        let (base_version, changes) = match store.get(entity_type) {
            None => {
                debug!(entity_type, "no prior state, full sync required");
                return Ok(None);
            }
            Some(current) => (current.version.clone(), dse_delta::diff(&current.data, new_data)),
        };

        if changes.is_empty() {
            debug!(entity_type, "no changes against stored state");
            return Ok(None);
        }

        let packet = DeltaPacket {
            base_version,
            target_version: fresh_version(),
            changes,
            timestamp: now_millis(),
            checksum: checksum(new_data),
        };

        store.commit(entity_type, packet.target_version.clone(), new_data.clone())?;
        debug!(
            entity_type,
            changes = packet.change_count(),
            target = %packet.target_version,
            "delta packet created"
        );
        Ok(Some(packet))
    }

    /// Apply a received delta packet, returning the reconstructed state.
    ///
    /// Returns `Ok(None)` - with nothing committed - whenever the packet
    /// cannot be applied cleanly: no local record, base version mismatch,
    /// malformed changes, or checksum mismatch after patching. In every
    /// such case the caller's recovery is a full resync; partial
    /// application is never attempted.
    pub fn process_delta_packet(&self, entity_type: &str, packet: &DeltaPacket) -> Result<Option<StateMap>> {
        let mut store = self.store.lock();

        let base_data = match store.get(entity_type) {
            None => {
                debug!(entity_type, "no local state, full sync required");
                return Ok(None);
            }
            Some(current) if current.version != packet.base_version => {
                debug!(
                    entity_type,
                    local = %current.version,
                    packet_base = %packet.base_version,
                    "base version mismatch, full sync required"
                );
                return Ok(None);
            }
            Some(current) => current.data.clone(),
        };

        let new_data = match dse_delta::apply(&base_data, &packet.changes) {
            Ok(data) => data,
            Err(err) => {
                warn!(entity_type, %err, "malformed delta packet, discarding");
                return Ok(None);
            }
        };

        let actual = checksum(&new_data);
        if actual != packet.checksum {
            // Louder than a version mismatch: staleness does not explain a
            // bad digest, transport corruption might.
            warn!(
                entity_type,
                expected = %packet.checksum,
                actual = %actual,
                "checksum mismatch on reconstructed state, full sync required"
            );
            return Ok(None);
        }

        store.commit(entity_type, packet.target_version.clone(), new_data.clone())?;
        debug!(entity_type, version = %packet.target_version, "delta packet applied");
        Ok(Some(new_data))
    }

    /// Install first-ever state for an entity type. Delegates to the store.
    pub fn set_initial_state(&self, entity_type: &str, data: StateMap) -> Result<SyncState> {
        Ok(self.store.lock().set_initial_state(entity_type, data)?)
    }

    /// Install a known `{version, data}` pair, e.g. the payload of a full
    /// resync received from a peer. Delegates to the store's commit.
    pub fn commit_full_state(&self, entity_type: &str, version: impl Into<String>, data: StateMap) -> Result<()> {
        Ok(self.store.lock().commit(entity_type, version, data)?)
    }

    /// Current version for an entity type.
    pub fn get_version(&self, entity_type: &str) -> Option<String> {
        self.store.lock().get_version(entity_type).map(str::to_string)
    }

    /// Last successful sync time for an entity type, epoch millis.
    pub fn get_last_sync(&self, entity_type: &str) -> Option<u64> {
        self.store.lock().get_last_sync(entity_type)
    }

    /// Current full state for an entity type.
    pub fn get_state(&self, entity_type: &str) -> Option<StateMap> {
        self.store.lock().get(entity_type).map(|record| record.data.clone())
    }

    /// Aggregate store diagnostics.
    pub fn stats(&self) -> StoreStats {
        self.store.lock().stats()
    }

    /// Wipe all sync state.
    pub fn clear(&self) -> Result<()> {
        Ok(self.store.lock().clear()?)
    }
}

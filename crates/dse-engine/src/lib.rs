//! DSE Engine - the delta synchronization facade
//!
//! [`DeltaSyncService`] coordinates the lower layers into the two flows a
//! syncing device actually runs:
//!
//! **Outgoing** - new local state comes in, the stored state is diffed
//! against it, and a checksummed [`DeltaPacket`] goes out (with the local
//! store advanced optimistically - the sender is authoritative for its own
//! outgoing state).
//!
//! **Incoming** - a packet arrives, its base version is checked against the
//! store, the changes are replayed, the result is checksum-verified, and
//! only then is the store advanced. Any divergence - unknown entity, stale
//! base version, failed verification - yields `Ok(None)`: the caller falls
//! back to a full resync. Only storage failures are errors.
//!
//! The [`compress`] module carries the transport-side payload encoding
//! helper; the engine itself never compresses.
//!
//! # Example
//!
//! ```rust
//! use dse_engine::{DeltaSyncService, MemoryStorage};
//! use serde_json::json;
//!
//! # fn main() -> dse_engine::Result<()> {
//! let service = DeltaSyncService::open(MemoryStorage::new())?;
//!
//! let initial = json!({"count": 5}).as_object().cloned().unwrap();
//! service.set_initial_state("crew", initial)?;
//!
//! let updated = json!({"count": 7}).as_object().cloned().unwrap();
//! let packet = service.create_delta_packet("crew", &updated)?.expect("state changed");
//! assert_eq!(packet.change_count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! [`DeltaPacket`]: dse_core::DeltaPacket

pub mod compress;
pub mod error;
pub mod service;

// Re-exports for convenience
pub use compress::{compress, decompress, COMPRESSED_PREFIX, MIN_COMPRESS_LEN};
pub use error::{Result, SyncError};
pub use service::DeltaSyncService;

// Re-export the types callers handle through the facade
pub use dse_core::{ChangeOp, ChangePath, DeltaChange, DeltaPacket, StateMap, SyncState};
pub use dse_store::{FileStorage, MemoryStorage, StorageAdapter, StoreStats, VersionStore};

//! DSE Store - durable version/state bookkeeping
//!
//! Owns the [`SyncState`] records the rest of the engine reads and writes:
//!
//! - [`StorageAdapter`] - the seam to whatever actually persists bytes,
//!   with [`MemoryStorage`] (tests, simulation) and [`FileStorage`] (one
//!   JSON document on disk) implementations
//! - [`VersionStore`] - the eager-loading cache over an adapter, the single
//!   source of truth for per-entity-type version, state and sync time
//!
//! The whole store round-trips as one JSON document: loaded once at
//! construction, rewritten on every commit. Fine at per-device,
//! per-entity-type volumes; a larger deployment may shard to per-entity
//! keys behind the same adapter contract.
//!
//! [`SyncState`]: dse_core::SyncState

pub mod adapter;
pub mod error;
pub mod version_store;

// Re-export main types for convenience
pub use adapter::{FileStorage, MemoryStorage, StorageAdapter, StoreSnapshot};
pub use error::{Result, StoreError};
pub use version_store::{StoreStats, VersionStore};

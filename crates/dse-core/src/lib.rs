//! DSE Core - data model for the Driftsync Delta Sync Engine
//!
//! This crate defines the types that flow between the diff, patch, store and
//! facade layers:
//!
//! - [`ChangePath`] - dot-notation paths identifying a changed field
//! - [`DeltaChange`] - one atomic structural edit (add/remove/replace)
//! - [`DeltaPacket`] - a transmissible, checksummed batch of changes
//! - [`SyncState`] - per-entity-type version/state bookkeeping
//! - [`StateMap`] - the JSON-like entity state these all operate on
//!
//! State maps use `serde_json`'s default sorted map backing, so every
//! serialization of a state (wire, checksum input, persisted document) is
//! key-ordered canonically by construction.

pub mod change;
pub mod packet;
pub mod path;
pub mod state;

// Re-export main types for convenience
pub use change::{ChangeOp, DeltaChange};
pub use packet::DeltaPacket;
pub use path::ChangePath;
pub use state::{fresh_version, now_millis, StateMap, SyncState};

//! Error types for the engine facade.

use thiserror::Error;

/// Hard failures of the sync engine.
///
/// Ordinary divergence (no prior state, version mismatch, checksum
/// mismatch) is not an error - those are expected, frequent outcomes and
/// surface as `Ok(None)` so the resync path stays first-class.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Store(#[from] dse_store::StoreError),

    #[error("payload encoding failure: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;

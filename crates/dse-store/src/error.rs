//! Error types for the store layer.

use thiserror::Error;

/// Errors that can occur while loading or persisting the store.
///
/// These are the hard failures of the engine: expected divergence
/// (staleness, mismatches) never surfaces here, only adapter I/O and
/// document corruption. The engine does not retry internally.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("store document unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

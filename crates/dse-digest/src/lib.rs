//! DSE Digest - canonical serialization and integrity checksums
//!
//! Computes a stable digest of a state map for corruption detection:
//!
//! - [`canonical_json`] - the canonical serialized form of a state
//! - [`checksum`] - hex digest of that form (SHA-256 by default)
//!
//! The digest is an integrity check, not a trust boundary: it detects
//! transport corruption and divergent reconstruction, nothing adversarial.
//!
//! # Capability fallback
//!
//! With the default `sha` feature the digest is SHA-256. When the feature is
//! disabled (no cryptographic primitive available on the target), a 64-bit
//! FNV-1a rolling hash is compiled instead. Fallback digests carry the
//! [`FALLBACK_PREFIX`] so they are recognizably lower-assurance - good
//! against accidental corruption only. [`is_cryptographic`] reports which
//! path is active.

mod checksum;

pub use checksum::{canonical_json, checksum, is_cryptographic, FALLBACK_PREFIX};

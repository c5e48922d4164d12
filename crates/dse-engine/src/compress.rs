//! Transport-side payload compression.
//!
//! Applied by the transport around packet serialization, never by the
//! engine itself. The contract: `decompress(compress(x)) == x` for all `x`;
//! output self-identifies so the receiving side can tell whether
//! compression was applied at all.
//!
//! Payloads below [`MIN_COMPRESS_LEN`] pass through untouched - gzip
//! overhead beats the savings on small packets. Compressed output is gzip
//! then base64, carrying [`COMPRESSED_PREFIX`]. Un-prefixed input passes
//! through `decompress` unchanged; the payloads on this path are JSON
//! documents (they start with `{`), so the prefix cannot occur naturally.

use crate::error::{Result, SyncError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Marker identifying compressed payloads.
pub const COMPRESSED_PREFIX: &str = "gzb64:";

/// Payloads shorter than this are sent as-is.
pub const MIN_COMPRESS_LEN: usize = 1024;

/// Compress a payload for transmission.
pub fn compress(text: &str) -> Result<String> {
    if text.len() < MIN_COMPRESS_LEN {
        return Ok(text.to_string());
    }
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(text.as_bytes())
        .map_err(|err| SyncError::Encoding(err.to_string()))?;
    let bytes = encoder
        .finish()
        .map_err(|err| SyncError::Encoding(err.to_string()))?;
    Ok(format!("{}{}", COMPRESSED_PREFIX, STANDARD.encode(bytes)))
}

/// Undo [`compress`]. Input without the marker passes through unchanged.
pub fn decompress(text: &str) -> Result<String> {
    let Some(encoded) = text.strip_prefix(COMPRESSED_PREFIX) else {
        return Ok(text.to_string());
    };
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|err| SyncError::Encoding(err.to_string()))?;
    let mut decoder = GzDecoder::new(bytes.as_slice());
    let mut out = String::new();
    decoder
        .read_to_string(&mut out)
        .map_err(|err| SyncError::Encoding(err.to_string()))?;
    Ok(out)
}

//! Digest computation over canonically serialized state.

use dse_core::StateMap;

/// Prefix carried by fallback (non-cryptographic) digests.
pub const FALLBACK_PREFIX: &str = "fnv64:";

/// The canonical serialized form of a state map.
///
/// State maps are sorted by key at every level (the backing map is ordered),
/// so plain JSON serialization is already canonical: structurally equal
/// states serialize identically regardless of insertion order.
pub fn canonical_json(state: &StateMap) -> String {
    serde_json::to_string(state).expect("state maps always serialize to JSON")
}

/// Compute the integrity digest of a state map, as lowercase hex.
pub fn checksum(state: &StateMap) -> String {
    digest_text(&canonical_json(state))
}

/// Whether the compiled digest is cryptographic (SHA-256) rather than the
/// rolling-hash fallback.
pub fn is_cryptographic() -> bool {
    cfg!(feature = "sha")
}

#[cfg(feature = "sha")]
fn digest_text(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(not(feature = "sha"))]
fn digest_text(text: &str) -> String {
    format!("{}{:016x}", FALLBACK_PREFIX, fnv1a64(text.as_bytes()))
}

/// 64-bit FNV-1a. Collision-prone compared to SHA-256; only compiled when
/// no cryptographic primitive is available.
#[cfg(not(feature = "sha"))]
fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET_BASIS, |hash, byte| (hash ^ u64::from(*byte)).wrapping_mul(PRIME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state_of(value: serde_json::Value) -> StateMap {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_checksum_deterministic() {
        let state = state_of(json!({"count": 5, "crew": {"pilot": "dana"}}));
        assert_eq!(checksum(&state), checksum(&state));
    }

    #[test]
    fn test_checksum_ignores_insertion_order() {
        let mut forward = StateMap::new();
        forward.insert("alpha".to_string(), json!(1));
        forward.insert("zulu".to_string(), json!(2));
        let mut backward = StateMap::new();
        backward.insert("zulu".to_string(), json!(2));
        backward.insert("alpha".to_string(), json!(1));
        assert_eq!(canonical_json(&forward), canonical_json(&backward));
        assert_eq!(checksum(&forward), checksum(&backward));
    }

    #[test]
    fn test_different_states_differ() {
        let a = state_of(json!({"count": 5}));
        let b = state_of(json!({"count": 6}));
        assert_ne!(checksum(&a), checksum(&b));
    }

    #[cfg(feature = "sha")]
    #[test]
    fn test_known_vector_for_empty_state() {
        // SHA-256 of "{}".
        assert_eq!(
            checksum(&StateMap::new()),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[cfg(feature = "sha")]
    #[test]
    fn test_cryptographic_digest_has_no_prefix() {
        assert!(is_cryptographic());
        let digest = checksum(&StateMap::new());
        assert_eq!(digest.len(), 64);
        assert!(!digest.starts_with(FALLBACK_PREFIX));
    }

    #[cfg(not(feature = "sha"))]
    #[test]
    fn test_fallback_digest_is_flagged() {
        assert!(!is_cryptographic());
        assert!(checksum(&StateMap::new()).starts_with(FALLBACK_PREFIX));
    }
}

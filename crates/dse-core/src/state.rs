//! Per-entity-type sync bookkeeping.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};
use ulid::Ulid;

/// The full state of one entity type: a mapping from field name to JSON-like
/// value, nested without depth limit.
///
/// `serde_json`'s default map is sorted by key, which makes every
/// serialization of a state canonical - the checksum layer relies on this.
pub type StateMap = serde_json::Map<String, Value>;

/// Bookkeeping record for one entity type. The only persisted entity;
/// always replaced whole, never partially written. Absence of a record
/// means "full sync required".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    /// Opaque version id. Unique and equality-comparable; no global order.
    pub version: String,
    /// Time of last successful update, epoch millis.
    pub last_sync: u64,
    /// Current full state for the entity type.
    pub data: StateMap,
}

impl SyncState {
    /// Create a record with a freshly generated version, stamped now.
    pub fn new(data: StateMap) -> Self {
        Self {
            version: fresh_version(),
            last_sync: now_millis(),
            data,
        }
    }
}

/// Generate a fresh version id.
///
/// A ULID is a millisecond timestamp plus a random suffix - unique and
/// opaque, which is all the engine requires of a version.
pub fn fresh_version() -> String {
    Ulid::new().to_string()
}

/// Current wall-clock time in epoch millis.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state_of(value: Value) -> StateMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_fresh_versions_are_distinct() {
        let a = fresh_version();
        let b = fresh_version();
        assert_ne!(a, b);
    }

    #[test]
    fn test_new_record_is_stamped() {
        let record = SyncState::new(state_of(json!({"count": 5})));
        assert!(!record.version.is_empty());
        assert!(record.last_sync > 0);
        assert_eq!(record.data["count"], 5);
    }

    #[test]
    fn test_serde_camel_case() {
        let record = SyncState::new(state_of(json!({"count": 5})));
        let wire: Value = serde_json::to_value(&record).unwrap();
        assert!(wire.get("lastSync").is_some());
        assert!(wire.get("version").is_some());
        assert!(wire.get("data").is_some());
    }

    #[test]
    fn test_state_map_serializes_sorted() {
        let mut state = StateMap::new();
        state.insert("zulu".to_string(), json!(1));
        state.insert("alpha".to_string(), json!(2));
        let text = serde_json::to_string(&state).unwrap();
        assert_eq!(text, r#"{"alpha":2,"zulu":1}"#);
    }
}

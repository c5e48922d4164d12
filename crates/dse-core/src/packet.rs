//! The transmissible unit of change.

use crate::change::DeltaChange;
use serde::{Deserialize, Serialize};

/// A delta packet: everything a peer needs to move an entity's state from
/// `base_version` to `target_version`, plus integrity metadata.
///
/// Packets are ephemeral - produced, transmitted, consumed, never persisted.
/// A packet is never built with an empty change list; "nothing changed" is
/// signaled by producing no packet at all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaPacket {
    /// Version the sender believed the receiver was at.
    pub base_version: String,
    /// Version that results from applying this packet.
    pub target_version: String,
    /// Ordered edits; paths apply top-down, an `Add` to a nested path
    /// creates missing intermediate containers.
    pub changes: Vec<DeltaChange>,
    /// Creation time, epoch millis.
    pub timestamp: u64,
    /// Hex digest of the canonical serialization of the target state.
    pub checksum: String,
}

impl DeltaPacket {
    /// Serialize to the wire format (one JSON object).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse from the wire format.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Number of edits carried.
    pub fn change_count(&self) -> usize {
        self.changes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::DeltaChange;
    use crate::path::ChangePath;
    use serde_json::{json, Value};

    fn sample_packet() -> DeltaPacket {
        DeltaPacket {
            base_version: "01ARZ3NDEKTSV4RRFFQ69G5FAA".to_string(),
            target_version: "01ARZ3NDEKTSV4RRFFQ69G5FAB".to_string(),
            changes: vec![DeltaChange::replace(ChangePath::key("count"), json!(5), json!(7))],
            timestamp: 1_700_000_000_000,
            checksum: "deadbeef".to_string(),
        }
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let wire: Value = serde_json::to_value(sample_packet()).unwrap();
        assert!(wire.get("baseVersion").is_some());
        assert!(wire.get("targetVersion").is_some());
        assert!(wire.get("timestamp").is_some());
        assert!(wire.get("checksum").is_some());
        assert!(wire["changes"].is_array());
    }

    #[test]
    fn test_json_roundtrip() {
        let packet = sample_packet();
        let text = packet.to_json().unwrap();
        let back = DeltaPacket::from_json(&text).unwrap();
        assert_eq!(back, packet);
    }
}

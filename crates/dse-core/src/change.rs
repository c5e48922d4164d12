//! Atomic structural edits.

use crate::path::ChangePath;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of edit a [`DeltaChange`] performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    /// A field appeared that was not present before.
    Add,
    /// A field disappeared.
    Remove,
    /// A field's value changed (including whole-sequence replacement).
    Replace,
}

/// One atomic structural edit at a path.
///
/// `value` is required for `Add`/`Replace` replay; `old_value` is advisory
/// only (kept for audit and debugging, never needed to apply the change).
/// A `Remove` never carries `value`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaChange {
    pub path: ChangePath,
    #[serde(rename = "operation")]
    pub op: ChangeOp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
}

impl DeltaChange {
    /// A field addition.
    pub fn add(path: ChangePath, value: Value) -> Self {
        Self {
            path,
            op: ChangeOp::Add,
            value: Some(value),
            old_value: None,
        }
    }

    /// A field removal. The previous value travels along for audit.
    pub fn remove(path: ChangePath, old_value: Value) -> Self {
        Self {
            path,
            op: ChangeOp::Remove,
            value: None,
            old_value: Some(old_value),
        }
    }

    /// A value replacement.
    pub fn replace(path: ChangePath, old_value: Value, value: Value) -> Self {
        Self {
            path,
            op: ChangeOp::Replace,
            value: Some(value),
            old_value: Some(old_value),
        }
    }
}

//! Patch application over a base state.

use dse_core::{ChangeOp, DeltaChange, StateMap};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while replaying a change list.
///
/// Internally generated packets never trip these; they guard against
/// malformed or foreign packets. Callers discard the in-progress result on
/// any patch error and fall back to a full resync - there is no rollback of
/// changes already applied within the same list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("change has an empty path")]
    EmptyPath,

    #[error("missing value for {op} at {path}")]
    MissingValue { op: String, path: String },

    #[error("cannot descend into non-object at {path}")]
    NotAnObject { path: String },
}

pub type Result<T> = std::result::Result<T, PatchError>;

/// Apply `changes` to a copy of `base`, producing the new state.
///
/// Pure: `base` is never mutated. Each change walks its path top-down,
/// creating an empty object at any missing intermediate segment, then
/// assigns (`Add`/`Replace`) or deletes (`Remove`) at the final segment.
/// Removing an absent field is a no-op.
pub fn apply(base: &StateMap, changes: &[DeltaChange]) -> Result<StateMap> {
    let mut state = base.clone();
    for change in changes {
        apply_one(&mut state, change)?;
    }
    Ok(state)
}

fn apply_one(state: &mut StateMap, change: &DeltaChange) -> Result<()> {
    let segments = change.path.segments();
    let (last, parents) = segments.split_last().ok_or(PatchError::EmptyPath)?;

    let mut current = state;
    for (depth, segment) in parents.iter().enumerate() {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match slot {
            Value::Object(map) => map,
            _ => {
                return Err(PatchError::NotAnObject {
                    path: segments[..=depth].join("."),
                })
            }
        };
    }

    match change.op {
        ChangeOp::Add | ChangeOp::Replace => {
            let value = change.value.clone().ok_or_else(|| PatchError::MissingValue {
                op: if change.op == ChangeOp::Add { "add" } else { "replace" }.to_string(),
                path: change.path.to_string(),
            })?;
            current.insert(last.clone(), value);
        }
        ChangeOp::Remove => {
            current.remove(last);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dse_core::ChangePath;
    use serde_json::json;

    fn state_of(value: Value) -> StateMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_apply_is_pure() {
        let base = state_of(json!({"count": 5}));
        let changes = vec![DeltaChange::replace(ChangePath::key("count"), json!(5), json!(7))];
        let patched = apply(&base, &changes).unwrap();
        assert_eq!(patched["count"], 7);
        assert_eq!(base["count"], 5);
    }

    #[test]
    fn test_add_creates_missing_intermediates() {
        let base = state_of(json!({}));
        let changes = vec![DeltaChange::add(ChangePath::parse("crew.pilot.name"), json!("dana"))];
        let patched = apply(&base, &changes).unwrap();
        assert_eq!(patched["crew"]["pilot"]["name"], "dana");
    }

    #[test]
    fn test_remove_deletes_field() {
        let base = state_of(json!({"crew": {"pilot": "dana", "coms": "kim"}}));
        let changes = vec![DeltaChange::remove(ChangePath::parse("crew.coms"), json!("kim"))];
        let patched = apply(&base, &changes).unwrap();
        assert_eq!(patched["crew"], json!({"pilot": "dana"}));
    }

    #[test]
    fn test_remove_of_absent_field_is_noop() {
        let base = state_of(json!({"a": 1}));
        let changes = vec![DeltaChange::remove(ChangePath::parse("b.c"), json!(null))];
        let patched = apply(&base, &changes).unwrap();
        assert_eq!(patched["a"], 1);
    }

    #[test]
    fn test_changes_apply_in_order() {
        let base = state_of(json!({}));
        let changes = vec![
            DeltaChange::add(ChangePath::key("x"), json!(1)),
            DeltaChange::replace(ChangePath::key("x"), json!(1), json!(2)),
        ];
        let patched = apply(&base, &changes).unwrap();
        assert_eq!(patched["x"], 2);
    }

    #[test]
    fn test_empty_path_rejected() {
        let base = StateMap::new();
        let change = DeltaChange::add(ChangePath::parse(""), json!(1));
        assert_eq!(apply(&base, &[change]), Err(PatchError::EmptyPath));
    }

    #[test]
    fn test_scalar_intermediate_rejected() {
        let base = state_of(json!({"flat": 1}));
        let change = DeltaChange::add(ChangePath::parse("flat.deep"), json!(2));
        assert_eq!(
            apply(&base, &[change]),
            Err(PatchError::NotAnObject { path: "flat".to_string() })
        );
    }

    #[test]
    fn test_missing_value_rejected() {
        let base = StateMap::new();
        let change = DeltaChange {
            path: ChangePath::key("x"),
            op: ChangeOp::Replace,
            value: None,
            old_value: None,
        };
        let err = apply(&base, &[change]).unwrap_err();
        assert!(matches!(err, PatchError::MissingValue { .. }));
    }
}

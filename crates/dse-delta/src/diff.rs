//! Structural diff between two state maps.

use dse_core::{ChangePath, DeltaChange, StateMap};
use serde_json::Value;

/// Compute the list of structural changes that transforms `old` into `new`.
///
/// The walk is depth-first, per key, with removals emitted before additions
/// and replacements at each level. Emission order follows map iteration
/// order, which is sorted by key - deterministic for equal inputs.
///
/// Never called for a first sync: "no prior state" is handled by the caller
/// with full-sync semantics before any diffing happens.
pub fn diff(old: &StateMap, new: &StateMap) -> Vec<DeltaChange> {
    let mut changes = Vec::new();
    let mut prefix = Vec::new();
    diff_maps(old, new, &mut prefix, &mut changes);
    changes
}

fn diff_maps(old: &StateMap, new: &StateMap, prefix: &mut Vec<String>, out: &mut Vec<DeltaChange>) {
    for (key, old_value) in old {
        if !new.contains_key(key) {
            out.push(DeltaChange::remove(path_to(prefix, key), old_value.clone()));
        }
    }

    for (key, new_value) in new {
        match old.get(key) {
            None => {
                out.push(DeltaChange::add(path_to(prefix, key), new_value.clone()));
            }
            Some(old_value) => match (old_value, new_value) {
                (Value::Object(old_map), Value::Object(new_map)) => {
                    // Descend; the container itself produces no change.
                    prefix.push(key.clone());
                    diff_maps(old_map, new_map, prefix, out);
                    prefix.pop();
                }
                _ => {
                    // Scalars, nulls, type changes, and sequences all land
                    // here. Sequences are compared structurally and
                    // replaced whole.
                    if old_value != new_value {
                        out.push(DeltaChange::replace(
                            path_to(prefix, key),
                            old_value.clone(),
                            new_value.clone(),
                        ));
                    }
                }
            },
        }
    }
}

fn path_to(prefix: &[String], key: &str) -> ChangePath {
    let mut segments = prefix.to_vec();
    segments.push(key.to_string());
    ChangePath::new(segments)
}

//! Property-based tests for the diff/patch laws.
//!
//! These are the laws the rest of the engine leans on:
//!  - Round trip: apply(A, diff(A, B)) == B
//!  - No-op:      diff(A, A) is empty
//!  - Purity:     apply never mutates its base

use dse_core::StateMap;
use dse_delta::{apply, diff};
use proptest::prelude::*;
use serde_json::Value;

/// Arbitrary JSON values: scalars at the leaves, objects and sequences up to
/// a modest depth. Mirrors what entity state actually looks like.
fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1_000i64..1_000).prop_map(|n| Value::Number(n.into())),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,3}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn state_strategy() -> impl Strategy<Value = StateMap> {
    prop::collection::btree_map("[a-z]{1,3}", value_strategy(), 0..5)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #[test]
    fn patch_of_diff_reconstructs_target(a in state_strategy(), b in state_strategy()) {
        let changes = diff(&a, &b);
        let rebuilt = apply(&a, &changes).expect("internally generated changes always apply");
        prop_assert_eq!(rebuilt, b);
    }

    #[test]
    fn diff_against_self_is_empty(a in state_strategy()) {
        prop_assert!(diff(&a, &a).is_empty());
    }

    #[test]
    fn apply_never_mutates_base(a in state_strategy(), b in state_strategy()) {
        let before = a.clone();
        let _ = apply(&a, &diff(&a, &b));
        prop_assert_eq!(a, before);
    }

    #[test]
    fn diff_emits_no_empty_paths(a in state_strategy(), b in state_strategy()) {
        prop_assert!(diff(&a, &b).iter().all(|c| !c.path.is_empty()));
    }
}

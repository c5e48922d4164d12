//! DSE Delta - structural diff and patch machinery
//!
//! This crate turns two versions of an entity's state into a minimal list of
//! [`DeltaChange`] edits, and replays such a list onto a base state:
//!
//! - [`diff::diff`] - depth-first structural comparison of two state maps
//! - [`patch::apply`] - pure application of a change list to a base state
//!
//! # Round-trip law
//!
//! For all state maps `A`, `B`:
//!
//! ```text
//! apply(A, diff(A, B)) == B
//! ```
//!
//! and `diff(A, A)` is empty. Both laws are property-tested.
//!
//! # Sequences are atomic
//!
//! Sequences are never diffed element by element. Two unequal sequences
//! produce one whole-sequence `Replace` at the sequence's own path, and the
//! patch layer assumes the same. This is documented behavior, not a
//! shortcut to be fixed: element-wise sequence merging is a concern this
//! engine deliberately leaves out.
//!
//! [`DeltaChange`]: dse_core::DeltaChange

pub mod diff;
pub mod patch;

// Re-export main entry points for convenience
pub use diff::diff;
pub use patch::{apply, PatchError};

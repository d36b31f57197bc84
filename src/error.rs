//! Diagnostics for precondition violations.
//!
//! The engine distinguishes expected merge conflicts (never an error;
//! they are encoded in the output and counted) from programmer or
//! invariant errors, which indicate the caller handed the engine inputs
//! that violate a structural precondition (duplicate keys within one
//! input, a three-way scalar merge invoked on fields that can genuinely
//! disagree on all three sides). Those abort the operation with a
//! diagnostic rather than being silently patched over.

use std::fmt::Debug;

/// Error returned when a precondition of the merge engine is violated.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// `simple_merge` was invoked on a triple that genuinely disagrees on
    /// all three sides. Callers must only use `simple_merge` on fields
    /// where a three-way conflict is structurally impossible.
    #[error("three-way scalar merge conflict: base={base}, local={local}, remote={remote}")]
    SimpleMergeConflict {
        base: String,
        local: String,
        remote: String,
    },

    /// The three-way (or two-way) matcher's post-conditions failed to
    /// hold: a walker remained valid, or a slot was never marked done.
    /// This indicates the inputs violated the key-identity precondition
    /// (the same key appeared twice within a single input sequence).
    #[error("set matcher invariant violated: {0}")]
    MatcherInvariant(&'static str),

    /// `merge_unit` was called with base, local, and remote all absent;
    /// at least one must be present.
    #[error("merge_unit requires at least one of base, local, remote to be present")]
    EmptyTriple,
}

pub(crate) fn simple_merge_conflict<T: Debug>(base: &T, local: &T, remote: &T) -> MergeError {
    MergeError::SimpleMergeConflict {
        base: format!("{base:?}"),
        local: format!("{local:?}"),
        remote: format!("{remote:?}"),
    }
}

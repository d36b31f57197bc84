//! Three-way scalar and list merges with no possibility of genuine
//! conflict.

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{MergeError, simple_merge_conflict};
use crate::matcher::ThreeWayMatch;

/// Three-way merge of an equatable scalar.
///
/// Only one side may have changed relative to `base`, or both sides may
/// have converged on the same change. Callers must only invoke this on
/// fields where a structural guarantee rules out a genuine three-way
/// conflict (booleans describing a single property, or per-element merges
/// inside a set where at most one side can differ from absent). Any other
/// use surfaces as [`MergeError::SimpleMergeConflict`] rather than
/// silently picking a side.
pub fn simple_merge<T>(base: &T, local: &T, remote: &T) -> Result<T, MergeError>
where
    T: PartialEq + Clone + Debug,
{
    if base == remote {
        Ok(local.clone())
    } else if base == local {
        Ok(remote.clone())
    } else if local == remote {
        Ok(local.clone())
    } else {
        Err(simple_merge_conflict(base, local, remote))
    }
}

fn simple_merge_opt<T>(base: Option<&T>, local: Option<&T>, remote: Option<&T>) -> Result<Option<T>, MergeError>
where
    T: PartialEq + Clone + Debug,
{
    simple_merge(&base.cloned(), &local.cloned(), &remote.cloned())
}

/// Three-way merge of a list treated as a set keyed by value: runs the
/// three-way matcher over the three lists with an identity key function
/// and no deleted-predicate, applies [`simple_merge`] to each matched
/// triple, drops the (structurally impossible to conflict) absences, and
/// returns the survivors in matcher order.
pub fn list_merge<T>(base: &[T], local: &[T], remote: &[T]) -> Result<Vec<T>, MergeError>
where
    T: Eq + Hash + Clone + Debug,
{
    let matcher = ThreeWayMatch::new(base, local, remote, |x: &T| x.clone(), |_: &T| false);
    let mut out = Vec::new();
    for (b, l, r) in matcher {
        if let Some(value) = simple_merge_opt(b, l, r)? {
            out.push(value);
        }
    }
    Ok(out)
}

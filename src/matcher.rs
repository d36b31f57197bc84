//! Order-preserving two- and three-way set matchers.
//!
//! Given sequences of items sharing a key space, these emit every distinct
//! key exactly once, paired with whichever of the inputs contain it, in an
//! order that preserves `local` (or `new`) order where possible and falls
//! back to `remote` (or `old`/`base`) order for keys that are new to one
//! side or exist only historically.
//!
//! Both matchers are generic over the item type and take an injected key
//! function and deleted-predicate rather than assuming a particular unit
//! type: the same machinery backs the catalog-level match (`keyfunc =
//! CatalogUnit::key`) and the plain list-merge used for locations, notes,
//! and type-comment tokens (`keyfunc = Clone::clone`, `deletedfunc = |_|
//! false`).

use fnv::FnvHashMap;
use std::hash::Hash;

use crate::error::MergeError;
use crate::walker::Walker;

/// One emitted match: the base/local/remote occurrences of a single key.
/// At least one of the three is always `Some`.
pub type Triple<'a, T> = (Option<&'a T>, Option<&'a T>, Option<&'a T>);

/// One emitted match from the two-way matcher: the old/new occurrences of
/// a single key. At least one of the two is always `Some`.
pub type TwoWayTriple<'a, T> = (Option<&'a T>, Option<&'a T>);

struct Slot3<'a, T> {
    base: Option<&'a T>,
    local: Option<&'a T>,
    remote: Option<&'a T>,
    done: bool,
}

impl<T> Default for Slot3<'_, T> {
    fn default() -> Self {
        Slot3 {
            base: None,
            local: None,
            remote: None,
            done: false,
        }
    }
}

#[derive(PartialEq, Eq)]
enum Stage {
    Main,
    Drain,
    Done,
}

/// A lazy, single-pass, non-restartable three-way set match.
///
/// Consume it as the [`Iterator`] it is; it must not be collected and
/// replayed (exactly one pass over `base`, `local`, and `remote` is made).
pub struct ThreeWayMatch<'a, T, K, KF, DF>
where
    K: Eq + Hash + Clone,
    KF: Fn(&T) -> K,
    DF: Fn(&T) -> bool,
{
    slots: FnvHashMap<K, Slot3<'a, T>>,
    base_walker: Walker<std::slice::Iter<'a, T>>,
    local_walker: Walker<std::slice::Iter<'a, T>>,
    remote_walker: Walker<std::slice::Iter<'a, T>>,
    keyfunc: KF,
    deletedfunc: DF,
    stage: Stage,
}

impl<'a, T, K, KF, DF> ThreeWayMatch<'a, T, K, KF, DF>
where
    K: Eq + Hash + Clone,
    KF: Fn(&T) -> K,
    DF: Fn(&T) -> bool,
{
    /// Builds the matcher's `item_map` pre-pass and primes the three
    /// walkers. `base`/`local`/`remote` must each contain no duplicate
    /// keys under `keyfunc` (the key-identity precondition); violating it
    /// surfaces as a [`MergeError::MatcherInvariant`] from [`Iterator`]
    /// exhaustion-time assertions, not from this constructor.
    pub fn new(base: &'a [T], local: &'a [T], remote: &'a [T], keyfunc: KF, deletedfunc: DF) -> Self {
        let mut slots: FnvHashMap<K, Slot3<'a, T>> = FnvHashMap::default();
        for item in base {
            slots.entry(keyfunc(item)).or_default().base = Some(item);
        }
        for item in local {
            slots.entry(keyfunc(item)).or_default().local = Some(item);
        }
        for item in remote {
            slots.entry(keyfunc(item)).or_default().remote = Some(item);
        }

        ThreeWayMatch {
            slots,
            base_walker: Walker::new(base.iter()),
            local_walker: Walker::new(local.iter()),
            remote_walker: Walker::new(remote.iter()),
            keyfunc,
            deletedfunc,
            stage: Stage::Main,
        }
    }

    fn not_local(&self, key: &K) -> bool {
        let slot = &self.slots[key];
        match slot.local {
            None => true,
            Some(local) => {
                let remote = slot.remote.expect("not_local called with remote absent");
                (self.deletedfunc)(local) && !(self.deletedfunc)(remote)
            }
        }
    }

    fn sweep(&mut self) {
        while self.local_walker.valid()
            && self.slots[&(self.keyfunc)(self.local_walker.current().unwrap())].done
        {
            self.local_walker.advance();
        }
        while self.remote_walker.valid()
            && self.slots[&(self.keyfunc)(self.remote_walker.current().unwrap())].done
        {
            self.remote_walker.advance();
        }
    }

    /// Asserts the matcher's post-conditions: both walkers exhausted and
    /// every slot marked done. These hold for any input satisfying the
    /// key-identity precondition; a violation means the caller handed the
    /// matcher an input with a repeated key.
    pub fn finished_consistently(&self) -> Result<(), MergeError> {
        if self.stage != Stage::Done {
            return Err(MergeError::MatcherInvariant(
                "matcher consumed before reaching its drain stage",
            ));
        }
        if self.local_walker.valid() || self.remote_walker.valid() || self.base_walker.valid() {
            return Err(MergeError::MatcherInvariant(
                "walker still valid after matcher completed",
            ));
        }
        if self.slots.values().any(|slot| !slot.done) {
            return Err(MergeError::MatcherInvariant(
                "slot left undone after matcher completed",
            ));
        }
        Ok(())
    }
}

impl<'a, T, K, KF, DF> Iterator for ThreeWayMatch<'a, T, K, KF, DF>
where
    K: Eq + Hash + Clone,
    KF: Fn(&T) -> K,
    DF: Fn(&T) -> bool,
{
    type Item = Triple<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stage {
                Stage::Main => {
                    if !(self.local_walker.valid() || self.remote_walker.valid()) {
                        self.stage = Stage::Drain;
                        continue;
                    }
                    if let Some(remote_cur) = self.remote_walker.current() {
                        let key = (self.keyfunc)(remote_cur);
                        if self.not_local(&key) {
                            let slot = self.slots.get_mut(&key).expect("key was just looked up");
                            debug_assert!(!slot.done, "matcher invariant: slot emitted twice");
                            slot.done = true;
                            let triple = (slot.base, slot.local, slot.remote);
                            self.remote_walker.advance();
                            self.sweep();
                            return Some(triple);
                        }
                    }
                    if let Some(local_cur) = self.local_walker.current() {
                        let key = (self.keyfunc)(local_cur);
                        let slot = self.slots.get_mut(&key).expect("key was just looked up");
                        debug_assert!(!slot.done, "matcher invariant: slot emitted twice");
                        slot.done = true;
                        let triple = (slot.base, slot.local, slot.remote);
                        self.local_walker.advance();
                        self.sweep();
                        return Some(triple);
                    }
                    // Neither walker had something to offer even though at
                    // least one is valid: both are exhausted by the time we
                    // get here in practice, but guard against surprises by
                    // moving on to drain rather than looping forever.
                    self.stage = Stage::Drain;
                }
                Stage::Drain => {
                    while self.base_walker.valid() {
                        let cur = *self.base_walker.current().expect("checked valid");
                        let key = (self.keyfunc)(cur);
                        let slot = self.slots.get_mut(&key).expect("key was just looked up");
                        let was_done = slot.done;
                        slot.done = true;
                        let triple = (slot.base, slot.local, slot.remote);
                        self.base_walker.advance();
                        if !was_done {
                            return Some(triple);
                        }
                    }
                    self.stage = Stage::Done;
                }
                Stage::Done => return None,
            }
        }
    }
}

struct Slot2<'a, T> {
    old: Option<&'a T>,
    new: Option<&'a T>,
    done: bool,
}

impl<T> Default for Slot2<'_, T> {
    fn default() -> Self {
        Slot2 {
            old: None,
            new: None,
            done: false,
        }
    }
}

/// The two-way specialisation of [`ThreeWayMatch`]: no base-drain phase,
/// `new` takes the role `remote` plays in the three-way match. Used by
/// diff-style comparisons; this crate exposes it as a component in its own
/// right (see spec component list) even though nothing in the merge path
/// calls it, since merge has no two-way step.
pub struct TwoWayMatch<'a, T, K, KF, DF>
where
    K: Eq + Hash + Clone,
    KF: Fn(&T) -> K,
    DF: Fn(&T) -> bool,
{
    slots: FnvHashMap<K, Slot2<'a, T>>,
    old_walker: Walker<std::slice::Iter<'a, T>>,
    new_walker: Walker<std::slice::Iter<'a, T>>,
    keyfunc: KF,
    deletedfunc: DF,
    done: bool,
}

impl<'a, T, K, KF, DF> TwoWayMatch<'a, T, K, KF, DF>
where
    K: Eq + Hash + Clone,
    KF: Fn(&T) -> K,
    DF: Fn(&T) -> bool,
{
    pub fn new(old: &'a [T], new: &'a [T], keyfunc: KF, deletedfunc: DF) -> Self {
        let mut slots: FnvHashMap<K, Slot2<'a, T>> = FnvHashMap::default();
        for item in old {
            slots.entry(keyfunc(item)).or_default().old = Some(item);
        }
        for item in new {
            slots.entry(keyfunc(item)).or_default().new = Some(item);
        }

        TwoWayMatch {
            slots,
            old_walker: Walker::new(old.iter()),
            new_walker: Walker::new(new.iter()),
            keyfunc,
            deletedfunc,
            done: false,
        }
    }

    fn not_old(&self, key: &K) -> bool {
        let slot = &self.slots[key];
        match slot.old {
            None => true,
            Some(old) => {
                let new = slot.new.expect("not_old called with new absent");
                (self.deletedfunc)(old) && !(self.deletedfunc)(new)
            }
        }
    }

    fn sweep(&mut self) {
        while self.new_walker.valid()
            && self.slots[&(self.keyfunc)(self.new_walker.current().unwrap())].done
        {
            self.new_walker.advance();
        }
        while self.old_walker.valid()
            && self.slots[&(self.keyfunc)(self.old_walker.current().unwrap())].done
        {
            self.old_walker.advance();
        }
    }
}

impl<'a, T, K, KF, DF> Iterator for TwoWayMatch<'a, T, K, KF, DF>
where
    K: Eq + Hash + Clone,
    KF: Fn(&T) -> K,
    DF: Fn(&T) -> bool,
{
    type Item = TwoWayTriple<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        while self.old_walker.valid() || self.new_walker.valid() {
            if let Some(new_cur) = self.new_walker.current() {
                let key = (self.keyfunc)(new_cur);
                if self.not_old(&key) {
                    let slot = self.slots.get_mut(&key).expect("key was just looked up");
                    debug_assert!(!slot.done, "matcher invariant: slot emitted twice");
                    slot.done = true;
                    let pair = (slot.old, slot.new);
                    self.new_walker.advance();
                    self.sweep();
                    return Some(pair);
                }
            }
            if let Some(old_cur) = self.old_walker.current() {
                let key = (self.keyfunc)(old_cur);
                let slot = self.slots.get_mut(&key).expect("key was just looked up");
                debug_assert!(!slot.done, "matcher invariant: slot emitted twice");
                slot.done = true;
                let pair = (slot.old, slot.new);
                self.old_walker.advance();
                self.sweep();
                return Some(pair);
            }
            break;
        }
        self.done = true;
        None
    }
}

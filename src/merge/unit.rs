//! Entry point for merging a single matched `(base, local, remote)` triple:
//! handles the generic creation/deletion/resurrection cases uniformly for
//! any unit, then, for a triple present on all three sides, merges the
//! presentation-only fields (locations, notes, type comments, obsolete
//! flag) before dispatching to the header or target merger.

use crate::catalog::CatalogMeta;
use crate::error::MergeError;
use crate::merge::header::merge_header;
use crate::merge::simple::{list_merge, simple_merge};
use crate::merge::target::merge_target;
use crate::unit::{CatalogUnit, NoteOrigin};

/// Merges one matched triple, returning the output unit (`None` if the
/// unit should be dropped entirely) and the number of genuine conflicts it
/// contributed.
///
/// Creation and deletion are handled generically here regardless of what
/// kind of unit it is: a unit missing from `base` was created independently
/// on one or both of the other sides, and a unit missing from `local` or
/// `remote` was deleted there (unless it was already obsolete in `base`,
/// in which case deletion is a no-op: the unit was already gone from the
/// live catalog). Obsolete is just another property once all three sides
/// agree the unit exists at all.
pub(crate) fn merge_unit<U: CatalogUnit>(
    base: Option<&U>,
    local: Option<&U>,
    remote: Option<&U>,
    local_meta: &CatalogMeta<'_>,
    remote_meta: &CatalogMeta<'_>,
) -> Result<(Option<U>, usize), MergeError> {
    match (base, local, remote) {
        (None, None, None) => Err(MergeError::EmptyTriple),
        (None, local, None) => Ok((local.map(CatalogUnit::clone_for_output), 0)),
        (None, None, remote) => Ok((remote.map(CatalogUnit::clone_for_output), 0)),
        (None, Some(local), Some(remote)) => {
            // Created independently on both sides: the synthetic empty
            // base carries neither side's content, so the structural merge
            // below degrades to "take whatever differs from empty".
            let synthetic_base = local.empty_like();
            structural_merge(&synthetic_base, local, remote, local_meta, remote_meta).map(|(u, c)| (Some(u), c))
        }
        (Some(base), local, None) => {
            let mut out = match local {
                Some(local) => local.clone_for_output(),
                None => return Ok((None, 0)),
            };
            if !base.is_obsolete() {
                out.make_obsolete();
            }
            Ok((Some(out), 0))
        }
        (Some(base), None, Some(remote)) => {
            let mut out = remote.clone_for_output();
            if !base.is_obsolete() {
                out.make_obsolete();
            }
            Ok((Some(out), 0))
        }
        (Some(_), Some(local), Some(remote)) => {
            let base = base.expect("matched above");
            structural_merge(base, local, remote, local_meta, remote_meta).map(|(u, c)| (Some(u), c))
        }
    }
}

fn structural_merge<U: CatalogUnit>(
    base: &U,
    local: &U,
    remote: &U,
    local_meta: &CatalogMeta<'_>,
    remote_meta: &CatalogMeta<'_>,
) -> Result<(U, usize), MergeError> {
    let mut out = local.empty_like();

    for location in list_merge(base.locations(), local.locations(), remote.locations())? {
        out.add_location(location);
    }
    for note in list_merge(base.notes(NoteOrigin::Developer), local.notes(NoteOrigin::Developer), remote.notes(NoteOrigin::Developer))? {
        out.add_note(NoteOrigin::Developer, note);
    }
    for note in list_merge(base.notes(NoteOrigin::Translator), local.notes(NoteOrigin::Translator), remote.notes(NoteOrigin::Translator))? {
        out.add_note(NoteOrigin::Translator, note);
    }
    let types = list_merge(base.type_comments(), local.type_comments(), remote.type_comments())?;
    out.set_type_comments(types);

    if simple_merge(&base.is_obsolete(), &local.is_obsolete(), &remote.is_obsolete())? {
        out.make_obsolete();
    }

    let conflicts = if local.is_header() {
        merge_header(&mut out, base, local, remote, local_meta, remote_meta)?
    } else {
        merge_target(&mut out, base, local, remote, local_meta, remote_meta)?
    };

    Ok((out, conflicts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Target;

    #[derive(Clone)]
    struct Unit {
        key: &'static str,
        target: Target,
        fuzzy: bool,
        obsolete: bool,
        header: bool,
        locations: Vec<String>,
        dev_notes: Vec<String>,
        tr_notes: Vec<String>,
        types: Vec<String>,
    }

    impl Unit {
        fn new(key: &'static str) -> Self {
            Unit {
                key,
                target: Target::empty(),
                fuzzy: false,
                obsolete: false,
                header: false,
                locations: Vec::new(),
                dev_notes: Vec::new(),
                tr_notes: Vec::new(),
                types: Vec::new(),
            }
        }
    }

    impl CatalogUnit for Unit {
        type Key = &'static str;
        fn key(&self) -> Self::Key {
            self.key
        }
        fn target(&self) -> &Target {
            &self.target
        }
        fn set_target(&mut self, target: Target) {
            self.target = target;
        }
        fn is_fuzzy(&self) -> bool {
            self.fuzzy
        }
        fn mark_fuzzy(&mut self, fuzzy: bool) {
            self.fuzzy = fuzzy;
        }
        fn is_obsolete(&self) -> bool {
            self.obsolete
        }
        fn make_obsolete(&mut self) {
            self.obsolete = true;
        }
        fn is_header(&self) -> bool {
            self.header
        }
        fn has_plural(&self) -> bool {
            false
        }
        fn locations(&self) -> &[String] {
            &self.locations
        }
        fn add_location(&mut self, location: String) {
            self.locations.push(location);
        }
        fn notes(&self, origin: NoteOrigin) -> &[String] {
            match origin {
                NoteOrigin::Developer => &self.dev_notes,
                NoteOrigin::Translator => &self.tr_notes,
            }
        }
        fn add_note(&mut self, origin: NoteOrigin, line: String) {
            match origin {
                NoteOrigin::Developer => self.dev_notes.push(line),
                NoteOrigin::Translator => self.tr_notes.push(line),
            }
        }
        fn type_comments(&self) -> &[String] {
            &self.types
        }
        fn set_type_comments(&mut self, lines: Vec<String>) {
            self.types = lines;
        }
        fn prev_msgctxt(&self) -> Option<&str> {
            None
        }
        fn prev_msgid(&self) -> Option<&str> {
            None
        }
        fn prev_msgid_plural(&self) -> Option<&str> {
            None
        }
        fn set_prev(&mut self, _: Option<String>, _: Option<String>, _: Option<String>) {}
        fn clone_for_output(&self) -> Self {
            self.clone()
        }
        fn empty_like(&self) -> Self {
            Unit::new(self.key)
        }
    }

    #[test]
    fn unit_added_only_on_local_is_adopted_verbatim() {
        let local = Unit::new("greeting");
        let (out, conflicts) = merge_unit(None, Some(&local), None, &CatalogMeta::default(), &CatalogMeta::default()).unwrap();
        assert_eq!(conflicts, 0);
        assert!(out.is_some());
    }

    #[test]
    fn unit_deleted_on_remote_becomes_obsolete() {
        let base = Unit::new("greeting");
        let mut local = Unit::new("greeting");
        local.add_location("here:1".to_string());
        let (out, conflicts) = merge_unit(Some(&base), Some(&local), None, &CatalogMeta::default(), &CatalogMeta::default()).unwrap();
        assert_eq!(conflicts, 0);
        let out = out.unwrap();
        assert!(out.is_obsolete());
        assert_eq!(out.locations(), &["here:1".to_string()]);
    }

    #[test]
    fn unit_already_obsolete_in_base_stays_deleted_not_reobsoleted() {
        let mut base = Unit::new("greeting");
        base.make_obsolete();
        let local = Unit::new("greeting");
        let (out, conflicts) = merge_unit(Some(&base), Some(&local), None, &CatalogMeta::default(), &CatalogMeta::default()).unwrap();
        assert_eq!(conflicts, 0);
        // Already obsolete in base and dropped on remote: the clone from
        // local is returned without re-marking, matching the source's
        // "only if not already obsolete" rule.
        assert!(out.is_some());
    }

    #[test]
    fn unit_missing_entirely_on_both_sides_disappears() {
        let base = Unit::new("greeting");
        let (out, conflicts) = merge_unit(Some(&base), None, None, &CatalogMeta::default(), &CatalogMeta::default()).unwrap();
        assert_eq!(conflicts, 0);
        assert!(out.is_none());
    }

    #[test]
    fn parallel_creation_merges_locations_and_notes() {
        let mut local = Unit::new("greeting");
        local.add_location("here:4".to_string());
        let mut remote = Unit::new("greeting");
        remote.add_location("there:5".to_string());

        let (out, conflicts) = merge_unit(None, Some(&local), Some(&remote), &CatalogMeta::default(), &CatalogMeta::default()).unwrap();
        assert_eq!(conflicts, 0);
        let out = out.unwrap();
        assert_eq!(out.locations(), &["here:4".to_string(), "there:5".to_string()]);
    }
}

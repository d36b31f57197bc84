//! The abstract catalog-unit contract the merge engine consumes.
//!
//! A duck-typed concrete PO unit class is re-expressed here as an explicit
//! capability trait: the only
//! variation point is header vs. normal entry within one concrete format,
//! which is a tagged dispatch inside the merge logic (see
//! [`crate::merge`]), not a type hierarchy.

/// Which comment stream a note line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteOrigin {
    /// Comments left by developers (`#.` lines), usually extracted
    /// automatically from the source.
    Developer,
    /// Comments left by translators (`#` lines).
    Translator,
}

/// A unit's translation, either a single string or one per plural form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A translation with no plural forms.
    Single(String),
    /// A translation with one string per plural form.
    Plural(Vec<String>),
}

impl Target {
    /// An empty, non-plural target: the default for a freshly created unit.
    pub fn empty() -> Self {
        Target::Single(String::new())
    }

    /// The per-plural-form strings, or the single string as a one-element
    /// slice when there are no plural forms.
    pub fn strings(&self) -> &[String] {
        match self {
            Target::Single(s) => std::slice::from_ref(s),
            Target::Plural(strings) => strings,
        }
    }

    /// True iff every string in the target is empty or all whitespace.
    pub fn is_blank(&self) -> bool {
        self.strings().iter().all(|s| s.trim().is_empty())
    }

    /// The target as a single piece of text, as used for header bodies.
    /// Plural targets (which headers never are) join their forms with a
    /// newline.
    pub fn as_text(&self) -> String {
        match self {
            Target::Single(s) => s.clone(),
            Target::Plural(strings) => strings.join("\n"),
        }
    }
}

/// A translation unit as the merge engine needs to see it.
///
/// Implementors own their storage; the engine never assumes a particular
/// representation beyond this contract. [`CatalogUnit::clone_for_output`]
/// and [`CatalogUnit::empty_like`] stand in for the reference
/// implementation's generic deep copy, which has no portable Rust
/// equivalent.
pub trait CatalogUnit {
    /// A unit's stable identity: for PO this is `(msgctxt, msgid)`, but the
    /// engine treats it as an opaque, totally-equatable, hashable token.
    type Key: Eq + std::hash::Hash + Clone;

    /// This unit's key. Must be stable for the unit's lifetime, and must
    /// not collide with another unit's key within the same catalog.
    fn key(&self) -> Self::Key;

    /// The current translation.
    fn target(&self) -> &Target;
    /// Replace the translation.
    fn set_target(&mut self, target: Target);

    /// Whether the translation is marked fuzzy (present but not trusted).
    fn is_fuzzy(&self) -> bool;
    /// Set or clear the fuzzy marker.
    fn mark_fuzzy(&mut self, fuzzy: bool);

    /// Whether this unit is retained for history but not presented to
    /// translators.
    fn is_obsolete(&self) -> bool;
    /// Mark this unit obsolete. One-way: there is no un-obsoleting
    /// primitive, matching the reference semantics.
    fn make_obsolete(&mut self);

    /// Whether this unit is the catalog's header (RFC-822-style metadata).
    fn is_header(&self) -> bool;
    /// Whether this unit has plural forms.
    fn has_plural(&self) -> bool;
    /// Whether the target is empty or all whitespace.
    fn is_blank(&self) -> bool {
        self.target().is_blank()
    }

    /// Source-reference locations (`file:line`), presentation-only.
    fn locations(&self) -> &[String];
    /// Append a location.
    fn add_location(&mut self, location: String);

    /// Comment lines for the given origin, in order.
    fn notes(&self, origin: NoteOrigin) -> &[String];
    /// Append one comment line for the given origin.
    fn add_note(&mut self, origin: NoteOrigin, line: String);

    /// Raw `#, ...` type-comment lines (format markers such as
    /// `python-brace-format`, plus `fuzzy` when present).
    fn type_comments(&self) -> &[String];
    /// Replace the type-comment lines wholesale.
    fn set_type_comments(&mut self, lines: Vec<String>);

    /// Previous msgctxt, set when this unit is fuzzy and the source
    /// changed since the last extraction.
    fn prev_msgctxt(&self) -> Option<&str>;
    /// Previous msgid.
    fn prev_msgid(&self) -> Option<&str>;
    /// Previous msgid_plural.
    fn prev_msgid_plural(&self) -> Option<&str>;
    /// Replace the previous msgctxt/msgid/msgid_plural triple at once.
    fn set_prev(
        &mut self,
        msgctxt: Option<String>,
        msgid: Option<String>,
        msgid_plural: Option<String>,
    );

    /// A deep copy suitable for inclusion in a freshly built output
    /// catalog. Implementors backed by owned data can simply derive
    /// `Clone` and delegate; the explicit method exists so the engine
    /// never assumes a blanket `Clone` bound is available or sufficient.
    fn clone_for_output(&self) -> Self;

    /// A fresh unit of the same concrete type, sharing this unit's key
    /// (source text and disambiguating context), used as a synthetic base
    /// when a unit was created independently on both `local` and `remote`.
    ///
    /// Implementors must preserve [`CatalogUnit::is_header`] and
    /// [`CatalogUnit::has_plural`] from `self`: callers build their merge
    /// output by calling `empty_like` and then filling in fields, and rely
    /// on the result carrying the same header/plural classification as the
    /// unit it was built from. Everything else (target, flags, comments,
    /// locations) starts blank regardless of `self`'s state.
    fn empty_like(&self) -> Self;
}

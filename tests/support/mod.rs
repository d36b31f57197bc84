//! Shared fixture for the integration tests: a minimal, in-memory
//! `CatalogUnit`/`Catalog` pair that stands in for a parsed PO file so
//! tests exercise the merge engine through its public trait surface
//! rather than a concrete storage format.

use pomerge::{Catalog, CatalogUnit, NoteOrigin, Target};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(pub String);

#[derive(Debug, Clone)]
pub struct TestUnit {
    pub msgid: String,
    pub target: Target,
    pub fuzzy: bool,
    pub obsolete: bool,
    pub header: bool,
    pub plural: bool,
    pub locations: Vec<String>,
    pub dev_notes: Vec<String>,
    pub tr_notes: Vec<String>,
    pub types: Vec<String>,
    pub prev_msgctxt: Option<String>,
    pub prev_msgid: Option<String>,
    pub prev_msgid_plural: Option<String>,
}

impl TestUnit {
    pub fn new(msgid: &str, msgstr: &str) -> Self {
        TestUnit {
            msgid: msgid.to_string(),
            target: Target::Single(msgstr.to_string()),
            fuzzy: false,
            obsolete: false,
            header: msgid.is_empty(),
            plural: false,
            locations: Vec::new(),
            dev_notes: Vec::new(),
            tr_notes: Vec::new(),
            types: Vec::new(),
            prev_msgctxt: None,
            prev_msgid: None,
            prev_msgid_plural: None,
        }
    }

    pub fn header(body: &str) -> Self {
        let mut u = TestUnit::new("", "");
        u.target = Target::Single(body.to_string());
        u
    }

    pub fn fuzzy(mut self) -> Self {
        self.fuzzy = true;
        self
    }

    pub fn obsolete(mut self) -> Self {
        self.obsolete = true;
        self
    }

    pub fn at(mut self, location: &str) -> Self {
        self.locations.push(location.to_string());
        self
    }

    pub fn dev_note(mut self, note: &str) -> Self {
        self.dev_notes.push(note.to_string());
        self
    }

    pub fn tr_note(mut self, note: &str) -> Self {
        self.tr_notes.push(note.to_string());
        self
    }

    pub fn type_comment(mut self, comment: &str) -> Self {
        self.types.push(comment.to_string());
        self
    }
}

impl CatalogUnit for TestUnit {
    type Key = Key;

    fn key(&self) -> Self::Key {
        Key(self.msgid.clone())
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
        self.plural
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
        self.prev_msgctxt.as_deref()
    }

    fn prev_msgid(&self) -> Option<&str> {
        self.prev_msgid.as_deref()
    }

    fn prev_msgid_plural(&self) -> Option<&str> {
        self.prev_msgid_plural.as_deref()
    }

    fn set_prev(&mut self, msgctxt: Option<String>, msgid: Option<String>, msgid_plural: Option<String>) {
        self.prev_msgctxt = msgctxt;
        self.prev_msgid = msgid;
        self.prev_msgid_plural = msgid_plural;
    }

    fn clone_for_output(&self) -> Self {
        self.clone()
    }

    fn empty_like(&self) -> Self {
        let mut u = TestUnit::new(&self.msgid, "");
        u.header = self.header;
        u.plural = self.plural;
        u
    }
}

pub struct TestCatalog {
    pub units: Vec<TestUnit>,
    pub filename: Option<String>,
}

impl TestCatalog {
    pub fn new(units: Vec<TestUnit>) -> Self {
        TestCatalog { units, filename: None }
    }

    pub fn named(mut self, filename: &str) -> Self {
        self.filename = Some(filename.to_string());
        self
    }
}

impl Catalog for TestCatalog {
    type Unit = TestUnit;

    fn units(&self) -> &[Self::Unit] {
        &self.units
    }

    fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}

pub fn find<'a>(units: &'a [TestUnit], msgid: &str) -> Option<&'a TestUnit> {
    units.iter().find(|u| u.msgid == msgid)
}

pub fn text(target: &Target) -> String {
    target.as_text()
}

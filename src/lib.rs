//! Three-way merge engine for gettext-style translation catalogs.
//!
//! Given a common *base* catalog and two descendants *local* and *remote*,
//! [`merge_catalogs`] produces a merged catalog plus a count of unresolved
//! conflicts. Entries are matched by identity (source text plus
//! disambiguating context), not by file position; cosmetic differences
//! (location comments, type-comment flags, header field ordering) are
//! merged as sets so harmless divergence never produces a conflict; real
//! disagreements on translated text are preserved in a diagnostic form
//! (the fuzzy flag plus a `#-#-#-#-#`-delimited conflict marker) that a
//! translator tool can present and resolve.
//!
//! The crate is deliberately format-agnostic: it consumes an abstract
//! [`CatalogUnit`] / [`Catalog`] pair of traits rather than a concrete PO
//! data model. Parsing, serialization, and any command-line front-end are
//! left to callers.
//!
//! # Non-goals
//!
//! This crate does not detect or convert file formats, does not fuzzy-match
//! similar source strings (matching is exact on identity), and does not
//! validate translations semantically. It does not resolve conflicts
//! interactively: conflicts are materialized into the output for the
//! caller to present.

#![forbid(unsafe_code)]

mod catalog;
mod error;
mod matcher;
mod merge;
mod unit;
mod walker;

pub use catalog::{Catalog, CatalogMeta, MergeOutput, merge_catalogs};
pub use error::MergeError;
pub use matcher::{ThreeWayMatch, Triple, TwoWayMatch, TwoWayTriple};
pub use merge::{list_merge, simple_merge};
pub use unit::{CatalogUnit, NoteOrigin, Target};

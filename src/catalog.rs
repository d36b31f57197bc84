//! The top-level merge driver: runs the matcher over three catalogs' unit
//! sequences, invokes the unit merger per matched triple, regroups results
//! into header/normal/obsolete bands, and returns the merged catalog plus
//! the aggregated conflict count.

use fnv::FnvHashMap;

use crate::error::MergeError;
use crate::matcher::ThreeWayMatch;
use crate::merge::header::parse_header_map;
use crate::merge::unit::merge_unit;
use crate::unit::CatalogUnit;

/// Per-side context the unit merger needs purely for labelling: conflict
/// markers and header conflict-notes cite the originating file name and
/// that catalog's own `Project-Id-Version`. Computed once per input
/// catalog from its own header unit, rather than threaded through a
/// back-pointer on every individual unit (see DESIGN.md).
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogMeta<'a> {
    pub filename: Option<&'a str>,
    pub project_id_version: Option<&'a str>,
}

/// A catalog: an ordered collection of translation units with an optional
/// header unit, plus enough identity (a file name) and metadata (a parsed
/// header) to label conflicts.
pub trait Catalog {
    type Unit: CatalogUnit;

    /// This catalog's units, in file order.
    fn units(&self) -> &[Self::Unit];

    /// The file this catalog was loaded from, if any.
    fn filename(&self) -> Option<&str> {
        None
    }

    /// This catalog's own header, parsed into an RFC-822-style field map.
    /// Used only to label conflicts with a `Project-Id-Version`; empty if
    /// there is no header unit.
    fn parsed_header(&self) -> FnvHashMap<String, String> {
        self.units()
            .iter()
            .find(|u| u.is_header())
            .map(|h| parse_header_map(&h.target().as_text()))
            .unwrap_or_default()
    }
}

/// The three output bands plus the aggregated conflict count, matching the
/// band invariant: every header precedes every normal unit, which
/// precedes every obsolete unit.
#[derive(Debug)]
pub struct MergeOutput<U> {
    pub headers: Vec<U>,
    pub normal: Vec<U>,
    pub obsolete: Vec<U>,
    pub conflicts: usize,
}

impl<U> MergeOutput<U> {
    /// The three bands concatenated in band-invariant order
    /// (headers, then normal, then obsolete).
    pub fn into_units(self) -> Vec<U> {
        self.headers
            .into_iter()
            .chain(self.normal)
            .chain(self.obsolete)
            .collect()
    }
}

/// Three-way merges `local` and `remote` against their common ancestor
/// `base`, matching units by [`CatalogUnit::key`] rather than position.
pub fn merge_catalogs<C: Catalog>(base: &C, local: &C, remote: &C) -> Result<MergeOutput<C::Unit>, MergeError> {
    let local_header = local.parsed_header();
    let remote_header = remote.parsed_header();
    let local_meta = CatalogMeta {
        filename: local.filename(),
        project_id_version: local_header.get("Project-Id-Version").map(String::as_str),
    };
    let remote_meta = CatalogMeta {
        filename: remote.filename(),
        project_id_version: remote_header.get("Project-Id-Version").map(String::as_str),
    };

    let matcher = ThreeWayMatch::new(
        base.units(),
        local.units(),
        remote.units(),
        |u: &C::Unit| u.key(),
        |u: &C::Unit| u.is_obsolete(),
    );

    let mut headers = Vec::new();
    let mut normal = Vec::new();
    let mut obsolete = Vec::new();
    let mut conflicts = 0usize;

    for (b, l, r) in matcher {
        let (merged, c) = merge_unit(b, l, r, &local_meta, &remote_meta)?;
        conflicts += c;
        if let Some(unit) = merged {
            if unit.is_header() {
                headers.push(unit);
            } else if unit.is_obsolete() {
                obsolete.push(unit);
            } else {
                normal.push(unit);
            }
        }
    }

    Ok(MergeOutput {
        headers,
        normal,
        obsolete,
        conflicts,
    })
}

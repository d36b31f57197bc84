//! Three-way merge of a catalog header: an RFC-822-style `Key: Value`
//! block, merged field by field with timestamp-based tie-breaking for
//! genuine conflicts.

use fnv::FnvHashMap;

use crate::catalog::CatalogMeta;
use crate::error::MergeError;
use crate::merge::simple::{list_merge, simple_merge};
use crate::merge::timestamp::parse_timestamp;
use crate::unit::{CatalogUnit, NoteOrigin, Target};

/// Header keys considered template-owned (project identity, POT date, bug
/// address, team) and arbitrated by `POT-Creation-Date`. Every other key
/// is arbitrated by `PO-Revision-Date`.
const TEMPLATE_HEADERS: &[&str] = &[
    "Project-Id-Version",
    "Report-Msgid-Bugs-To",
    "POT-Creation-Date",
    "Language-Team",
];

/// Parses a header body (`Key: Value` lines) into a field map. Malformed
/// lines (no `:`) are skipped.
pub(crate) fn parse_header_map(text: &str) -> FnvHashMap<String, String> {
    let mut map = FnvHashMap::default();
    for line in text.lines() {
        if let Some(idx) = line.find(':') {
            let key = line[..idx].trim().to_string();
            let value = line[idx + 1..].trim().to_string();
            if !key.is_empty() {
                map.insert(key, value);
            }
        }
    }
    map
}

fn ordered_keys(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.find(':').map(|idx| line[..idx].trim().to_string()))
        .filter(|key| !key.is_empty())
        .collect()
}

fn newer(left: &FnvHashMap<String, String>, right: &FnvHashMap<String, String>, attribute: &str) -> bool {
    let left_time = left.get(attribute).map(|s| parse_timestamp(s)).unwrap_or(0);
    let right_time = right.get(attribute).map(|s| parse_timestamp(s)).unwrap_or(0);
    left_time >= right_time
}

/// Merges `local` and `remote`'s header bodies against `base`, writing the
/// result into `out` (already `empty_like(local)`). Returns `1` if any
/// field genuinely conflicted, `0` otherwise: the header contributes at
/// most one conflict regardless of how many individual fields disagreed.
pub(crate) fn merge_header<U: CatalogUnit>(
    out: &mut U,
    base: &U,
    local: &U,
    remote: &U,
    local_meta: &CatalogMeta<'_>,
    remote_meta: &CatalogMeta<'_>,
) -> Result<usize, MergeError> {
    let base_text = base.target().as_text();
    let local_text = local.target().as_text();
    let remote_text = remote.target().as_text();

    let base_map = parse_header_map(&base_text);
    let local_map = parse_header_map(&local_text);
    let remote_map = parse_header_map(&remote_text);

    let all_keys = list_merge(&ordered_keys(&base_text), &ordered_keys(&local_text), &ordered_keys(&remote_text))?;

    let mut had_conflict = false;
    let mut body = String::new();

    for key in &all_keys {
        let b = base_map.get(key);
        let l = local_map.get(key);
        let r = remote_map.get(key);

        let resolved = if b == l {
            r
        } else if b == r || l == r {
            l
        } else {
            had_conflict = true;
            let use_local = if TEMPLATE_HEADERS.contains(&key.as_str()) {
                newer(&local_map, &remote_map, "POT-Creation-Date")
            } else {
                newer(&local_map, &remote_map, "PO-Revision-Date")
            };

            let (used, other, other_filename) = if use_local {
                (l, &remote_map, remote_meta.filename.unwrap_or("remote"))
            } else {
                (r, &local_map, local_meta.filename.unwrap_or("local"))
            };

            let other_project = other.get("Project-Id-Version").map(String::as_str).unwrap_or("???");
            let other_value = other.get(key).map(String::as_str).unwrap_or("<unset>");
            out.add_note(
                NoteOrigin::Translator,
                format!("(conflict) {other_filename} ({other_project}): {key}: {other_value}"),
            );
            used
        };

        if let Some(value) = resolved {
            body.push_str(key);
            body.push_str(": ");
            body.push_str(value);
            body.push('\n');
        }
    }

    out.set_target(Target::Single(body));
    out.mark_fuzzy(simple_merge(&base.is_fuzzy(), &local.is_fuzzy(), &remote.is_fuzzy())?);

    Ok(if had_conflict { 1 } else { 0 })
}

//! Three-way merge of a non-header unit's translated text, producing
//! either a clean adoption of one side or, for a genuine conflict, a
//! `msgcat`-style conflict marker with the output marked fuzzy.

use crate::catalog::CatalogMeta;
use crate::error::MergeError;
use crate::unit::{CatalogUnit, Target};

/// Two units are equivalent for merge purposes if they carry the same
/// target text and either agree on the fuzzy flag or the target is empty
/// (an empty translation is flag-insensitive: "untranslated but fuzzy" and
/// "untranslated" are the same thing to a translator).
fn equivalent_translation<U: CatalogUnit>(a: &U, b: &U) -> bool {
    a.target() == b.target() && (a.is_fuzzy() == b.is_fuzzy() || a.target().is_blank())
}

fn quality<U: CatalogUnit>(unit: &U) -> u8 {
    if unit.is_blank() {
        0
    } else if unit.is_fuzzy() {
        1
    } else {
        2
    }
}

fn adopt<U: CatalogUnit>(out: &mut U, from: &U) {
    out.set_target(from.target().clone());
    if from.prev_msgid().is_some() {
        out.set_prev(
            from.prev_msgctxt().map(str::to_string),
            from.prev_msgid().map(str::to_string),
            from.prev_msgid_plural().map(str::to_string),
        );
    }
    out.mark_fuzzy(from.is_fuzzy());
}

fn conflict_marker<U: CatalogUnit>(local: &U, remote: &U, local_meta: &CatalogMeta<'_>, remote_meta: &CatalogMeta<'_>) -> Target {
    let local_file = local_meta.filename.unwrap_or("local");
    let remote_file = remote_meta.filename.unwrap_or("remote");
    let local_project = local_meta.project_id_version.unwrap_or("???");
    let remote_project = remote_meta.project_id_version.unwrap_or("???");

    let mut local_strings: Vec<String> = local.target().strings().to_vec();
    let mut remote_strings: Vec<String> = remote.target().strings().to_vec();
    while local_strings.len() < remote_strings.len() {
        local_strings.push(String::new());
    }
    while remote_strings.len() < local_strings.len() {
        remote_strings.push(String::new());
    }

    let block = |l: &str, r: &str| -> String {
        format!(
            "#-#-#-#-#  {local_file} ({local_project})  #-#-#-#-#\n{l}\n#-#-#-#-#  {remote_file} ({remote_project})  #-#-#-#-#\n{r}\n"
        )
    };

    if local.has_plural() {
        let blocks = local_strings
            .iter()
            .zip(remote_strings.iter())
            .map(|(l, r)| block(l, r))
            .collect();
        Target::Plural(blocks)
    } else {
        Target::Single(block(&local_strings[0], &remote_strings[0]))
    }
}

/// Merges the translated text of a non-header unit, writing the result
/// into `out`. Returns `1` on a genuine, equal-quality conflict, `0`
/// otherwise.
pub(crate) fn merge_target<U: CatalogUnit>(
    out: &mut U,
    base: &U,
    local: &U,
    remote: &U,
    local_meta: &CatalogMeta<'_>,
    remote_meta: &CatalogMeta<'_>,
) -> Result<usize, MergeError> {
    if equivalent_translation(base, local) {
        adopt(out, remote);
        return Ok(0);
    }
    if equivalent_translation(base, remote) {
        adopt(out, local);
        return Ok(0);
    }
    if equivalent_translation(local, remote) {
        adopt(out, local);
        return Ok(0);
    }

    let local_quality = quality(local);
    let remote_quality = quality(remote);
    if local_quality > remote_quality {
        adopt(out, local);
        return Ok(0);
    }
    if remote_quality > local_quality {
        adopt(out, remote);
        return Ok(0);
    }

    out.set_target(conflict_marker(local, remote, local_meta, remote_meta));
    out.mark_fuzzy(true);
    Ok(1)
}

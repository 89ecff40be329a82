//! Comparison of drift that is not keyed by identifier: prose sections and asset hashes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::snapshot::normalize::canonical_json;

/// Narrative sections compared between snapshots, in report order.
pub const NARRATIVE_SECTIONS: [&str; 4] = ["policy", "benefits", "summary", "resources"];

/// One asset whose digest differs between snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetChange {
    /// Asset file name.
    pub file: String,
    /// Digest in the old snapshot; `None` if the file was absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<String>,
    /// Digest in the new snapshot; `None` if the file is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<String>,
}

/// Names of narrative sections whose serialized content differs.
///
/// A section missing on one side and present on the other counts as changed.
#[must_use]
pub fn compare_narratives(old: &Value, new: &Value) -> Vec<String> {
    NARRATIVE_SECTIONS
        .iter()
        .filter(|section| section_text(old, section) != section_text(new, section))
        .map(|section| (*section).to_string())
        .collect()
}

/// Assets whose digest differs or which exist in only one snapshot, sorted by file name.
#[must_use]
pub fn compare_assets(old: &Value, new: &Value) -> Vec<AssetChange> {
    let files: BTreeSet<&str> = object_keys(old).chain(object_keys(new)).collect();

    files
        .into_iter()
        .filter_map(|file| {
            let old_hash = digest(old, file);
            let new_hash = digest(new, file);
            (old_hash != new_hash).then(|| AssetChange {
                file: file.to_string(),
                old: old_hash,
                new: new_hash,
            })
        })
        .collect()
}

fn section_text(narratives: &Value, section: &str) -> Option<String> {
    narratives.get(section).map(canonical_json)
}

fn object_keys(value: &Value) -> impl Iterator<Item = &str> {
    value.as_object().into_iter().flat_map(|map| map.keys().map(String::as_str))
}

/// Digest text for `file`. Non-string digests compare by their JSON form.
fn digest(hashes: &Value, file: &str) -> Option<String> {
    match hashes.get(file)? {
        Value::String(s) => Some(s.clone()),
        other => Some(canonical_json(other)),
    }
}

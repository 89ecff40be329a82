//! Set diff over identifier -> fingerprint maps.

use serde::{Deserialize, Serialize};

use crate::snapshot::Fingerprints;

/// Which identifier family a diff covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierFamily {
    /// `WSG-x.y` guideline identifiers.
    Guidelines,
    /// STAR technique identifiers.
    Star,
}

/// Added, removed, and modified identifiers of one family.
///
/// Unchanged identifiers appear in none of the lists. Lists are sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Family this diff covers.
    #[serde(rename = "type")]
    pub family: IdentifierFamily,
    /// Present in new, absent in old.
    #[serde(default)]
    pub added: Vec<String>,
    /// Present in old, absent in new.
    #[serde(default)]
    pub removed: Vec<String>,
    /// Present in both with different fingerprints.
    #[serde(default)]
    pub modified: Vec<String>,
}

impl DiffResult {
    /// An empty diff for `family`.
    #[must_use]
    pub fn empty(family: IdentifierFamily) -> Self {
        Self { family, added: Vec::new(), removed: Vec::new(), modified: Vec::new() }
    }

    /// Returns `true` if nothing was added, removed, or modified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// Diffs two fingerprint maps of the same family.
#[must_use]
pub fn diff_fingerprints(
    family: IdentifierFamily,
    old: &Fingerprints,
    new: &Fingerprints,
) -> DiffResult {
    let mut diff = DiffResult::empty(family);

    for (id, old_print) in old {
        match new.get(id) {
            None => diff.removed.push(id.clone()),
            Some(new_print) if new_print != old_print => diff.modified.push(id.clone()),
            Some(_) => {}
        }
    }
    diff.added = new.keys().filter(|id| !old.contains_key(*id)).cloned().collect();

    diff
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn prints(entries: &[(&str, &str)]) -> Fingerprints {
        entries.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    fn set(items: &[String]) -> BTreeSet<&str> {
        items.iter().map(String::as_str).collect()
    }

    #[test]
    fn classifies_added_removed_modified() {
        let old = prints(&[("WSG-1.1", "a"), ("WSG-3.2", "b"), ("WSG-4.1", "c")]);
        let new = prints(&[("WSG-1.1", "a"), ("WSG-4.1", "c2"), ("WSG-5.1", "d")]);

        let diff = diff_fingerprints(IdentifierFamily::Guidelines, &old, &new);

        assert_eq!(set(&diff.added), BTreeSet::from(["WSG-5.1"]));
        assert_eq!(set(&diff.removed), BTreeSet::from(["WSG-3.2"]));
        assert_eq!(set(&diff.modified), BTreeSet::from(["WSG-4.1"]));
    }

    #[test]
    fn lists_partition_the_key_union() {
        let old = prints(&[("A", "1"), ("B", "2"), ("C", "3"), ("D", "4")]);
        let new = prints(&[("B", "2"), ("C", "x"), ("E", "5"), ("F", "6")]);

        let diff = diff_fingerprints(IdentifierFamily::Star, &old, &new);
        let (added, removed, modified) = (set(&diff.added), set(&diff.removed), set(&diff.modified));

        assert!(added.is_disjoint(&removed));
        assert!(added.is_disjoint(&modified));
        assert!(removed.is_disjoint(&modified));

        let unchanged: BTreeSet<&str> = old
            .iter()
            .filter(|(k, v)| new.get(*k) == Some(*v))
            .map(|(k, _)| k.as_str())
            .collect();
        let union: BTreeSet<&str> = old.keys().chain(new.keys()).map(String::as_str).collect();
        let covered: BTreeSet<&str> =
            added.iter().chain(&removed).chain(&modified).chain(&unchanged).copied().collect();
        assert_eq!(covered, union);
        assert_eq!(added.len() + removed.len() + modified.len() + unchanged.len(), union.len());
    }

    #[test]
    fn identical_maps_diff_empty() {
        let map = prints(&[("STAR-UX01-1", "x"), ("UX02-1", "y")]);
        let diff = diff_fingerprints(IdentifierFamily::Star, &map, &map);
        assert!(diff.is_empty());
    }

    #[test]
    fn unchanged_technique_is_never_listed() {
        let old = prints(&[("STAR-UX01-1", "same"), ("DEV01-1", "a")]);
        let new = prints(&[("STAR-UX01-1", "same"), ("DEV01-2", "b")]);

        let diff = diff_fingerprints(IdentifierFamily::Star, &old, &new);
        for list in [&diff.added, &diff.removed, &diff.modified] {
            assert!(!list.iter().any(|id| id == "STAR-UX01-1"));
        }
    }

    #[test]
    fn serializes_family_as_type() {
        let diff = DiffResult::empty(IdentifierFamily::Star);
        let json = serde_json::to_value(&diff).unwrap();
        assert_eq!(json["type"], "star");
        assert_eq!(json["removed"], serde_json::json!([]));
    }
}

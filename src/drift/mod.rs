//! Drift detection between two normalized snapshots.
//!
//! Each snapshot is flattened into identifier -> fingerprint maps, the maps are
//! diffed per family, narrative sections and asset hashes are compared, and a
//! severity is derived. The resulting [`DriftReport`] is built once and not
//! mutated afterwards.

pub mod diff;
pub mod narrative;
pub mod report;
pub mod severity;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::snapshot::{normalize_snapshot, Snapshot};

pub use diff::{diff_fingerprints, DiffResult, IdentifierFamily};
pub use narrative::{compare_assets, compare_narratives, AssetChange, NARRATIVE_SECTIONS};
pub use report::format_drift_report;
pub use severity::{classify, Severity};

/// Result of comparing two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    /// When the comparison ran (ISO 8601).
    pub analysis_date: String,
    /// Derived severity.
    pub severity: Severity,
    /// Timestamps of the compared snapshots.
    pub comparison: Comparison,
    /// Everything that changed.
    pub changes: Changes,
}

/// Timestamps of the two compared snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Old snapshot timestamp, or `unknown`.
    pub from_snapshot: String,
    /// New snapshot timestamp, or `unknown`.
    pub to_snapshot: String,
}

/// All changes found between two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Changes {
    /// Guideline identifier diff.
    pub guidelines: DiffResult,
    /// STAR technique identifier diff.
    pub star: DiffResult,
    /// Names of changed narrative sections.
    pub narratives: Vec<String>,
    /// Assets whose digest changed.
    pub assets: Vec<AssetChange>,
}

impl DriftReport {
    /// Returns `true` if any identifier, narrative section, or asset changed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.guidelines.is_empty()
            || !self.changes.star.is_empty()
            || !self.changes.narratives.is_empty()
            || !self.changes.assets.is_empty()
    }
}

/// Compares `old` against `new`.
///
/// Malformed guideline or STAR sections degrade to empty families rather than
/// failing, so narrative and asset drift is still reported.
#[must_use]
pub fn detect_drift(old: &Snapshot, new: &Snapshot, analysis_date: String) -> DriftReport {
    let old_ids = normalize_snapshot(old);
    let new_ids = normalize_snapshot(new);

    let guidelines =
        diff_fingerprints(IdentifierFamily::Guidelines, &old_ids.guidelines, &new_ids.guidelines);
    let star = diff_fingerprints(IdentifierFamily::Star, &old_ids.techniques, &new_ids.techniques);
    let narratives = compare_narratives(&old.narratives, &new.narratives);
    let assets = compare_assets(&old.hashes, &new.hashes);
    let severity = classify(&guidelines, &star);

    info!(
        %severity,
        guidelines_removed = guidelines.removed.len(),
        star_removed = star.removed.len(),
        narratives = narratives.len(),
        assets = assets.len(),
        "drift computed"
    );

    DriftReport {
        analysis_date,
        severity,
        comparison: Comparison {
            from_snapshot: old.timestamp_or_unknown().to_string(),
            to_snapshot: new.timestamp_or_unknown().to_string(),
        },
        changes: Changes { guidelines, star, narratives, assets },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn snapshot(guidelines: Value, star: Value, hashes: Value) -> Snapshot {
        Snapshot {
            timestamp: Some("2026-01-01T00:00:00.000Z".into()),
            guidelines,
            star,
            narratives: json!({"policy": "p", "summary": "s"}),
            hashes,
            ..Snapshot::default()
        }
    }

    fn baseline() -> Snapshot {
        snapshot(
            json!([{"id": "3", "name": "Web Development", "guidelines": [
                {"id": "2", "guideline": "Remove unnecessary code", "criteria": []},
                {"id": "3", "guideline": "Modularize", "criteria": []}
            ]}]),
            json!([{"id": "UX", "techniques": [{"id": "STAR-UX01-1", "title": "Images"}]}]),
            json!({"guidelines": "g1", "star": "s1"}),
        )
    }

    #[test]
    fn removed_guideline_is_high() {
        let old = baseline();
        let mut new = baseline();
        new.guidelines = json!([{"id": "3", "guidelines": [
            {"id": "3", "guideline": "Modularize", "criteria": []}
        ]}]);

        let report = detect_drift(&old, &new, "now".into());

        assert_eq!(report.changes.guidelines.removed, vec!["WSG-3.2"]);
        assert!(report.changes.guidelines.modified.is_empty());
        assert!(report.changes.star.is_empty());
        assert_eq!(report.severity, Severity::High);
        assert!(report.has_changes());
    }

    #[test]
    fn self_diff_is_empty_regardless_of_key_order() {
        let old = baseline();
        let mut reordered = baseline();
        reordered.guidelines = json!([{"guidelines": [
            {"criteria": [], "guideline": "Modularize", "id": "3"},
            {"guideline": "Remove unnecessary code", "id": "2", "criteria": []}
        ], "name": "Web Development", "id": "3"}]);

        let report = detect_drift(&old, &reordered, "now".into());

        assert!(report.changes.guidelines.is_empty());
        assert!(report.changes.star.is_empty());
        assert!(report.changes.narratives.is_empty());
        assert!(report.changes.assets.is_empty());
        assert!(!report.has_changes());
        assert_eq!(report.severity, Severity::Low);
    }

    #[test]
    fn asset_only_change_is_low_but_still_a_change() {
        let old = baseline();
        let mut new = baseline();
        new.hashes = json!({"guidelines": "g2", "star": "s1"});

        let report = detect_drift(&old, &new, "now".into());

        assert_eq!(report.changes.assets.len(), 1);
        assert_eq!(report.severity, Severity::Low);
        assert!(report.has_changes());
    }

    #[test]
    fn narrative_only_change_stays_low() {
        let old = baseline();
        let mut new = baseline();
        new.narratives = json!({"policy": "rewritten", "summary": "s"});

        let report = detect_drift(&old, &new, "now".into());
        assert_eq!(report.changes.narratives, vec!["policy"]);
        assert_eq!(report.severity, Severity::Low);
    }

    #[test]
    fn malformed_family_still_compares_assets() {
        let old = baseline();
        let mut new = baseline();
        new.star = json!("not a list");
        new.hashes = json!({"guidelines": "g1", "star": "s2"});

        let report = detect_drift(&old, &new, "now".into());

        assert_eq!(report.changes.star.removed, vec!["STAR-UX01-1"]);
        assert_eq!(report.changes.assets[0].file, "star");
    }

    #[test]
    fn comparison_uses_unknown_for_missing_timestamps() {
        let report = detect_drift(&Snapshot::default(), &baseline(), "now".into());
        assert_eq!(report.comparison.from_snapshot, "unknown");
        assert_eq!(report.comparison.to_snapshot, "2026-01-01T00:00:00.000Z");
        assert_eq!(report.severity, Severity::Medium);
    }
}

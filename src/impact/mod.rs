//! Impact analysis: which curriculum files a drift report breaks or stales.
//!
//! Removed identifiers that are still cited become broken references;
//! modified identifiers that are cited become semantic-drift warnings;
//! everything else is a no-impact change. Guideline and STAR identifiers share
//! one lookup space.

pub mod report;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::curriculum::{CurriculumIndex, Occurrence};
use crate::error::DriftError;
use crate::snapshot::upstream::null_as_default;

pub use report::format_impact_report;

/// The parts of a drift report the impact analysis reads.
///
/// Accepts both `detect --format json` output and the monitor's report file.
/// Absent or `null` keys are empty lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DriftInput {
    /// Changes block.
    #[serde(deserialize_with = "null_as_default")]
    pub changes: InputChanges,
}

/// `changes` block of a drift report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputChanges {
    /// Guideline removals and modifications.
    #[serde(deserialize_with = "null_as_default")]
    pub guidelines: InputDiff,
    /// STAR removals and modifications.
    #[serde(deserialize_with = "null_as_default")]
    pub star: InputDiff,
}

/// Removed and modified identifiers of one family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputDiff {
    /// Removed identifiers.
    #[serde(deserialize_with = "null_as_default")]
    pub removed: Vec<String>,
    /// Modified identifiers.
    #[serde(deserialize_with = "null_as_default")]
    pub modified: Vec<String>,
}

impl DriftInput {
    /// Parses a drift report JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`DriftError::Json`] if `text` is not a JSON object of this shape.
    pub fn parse(text: &str, source: &str) -> Result<Self, DriftError> {
        serde_json::from_str(text).map_err(|e| DriftError::json(source, e))
    }

    /// Removed identifiers of both families, deduplicated, guidelines first.
    #[must_use]
    pub fn removed(&self) -> Vec<String> {
        union(&self.changes.guidelines.removed, &self.changes.star.removed)
    }

    /// Modified identifiers of both families, deduplicated, guidelines first.
    #[must_use]
    pub fn modified(&self) -> Vec<String> {
        union(&self.changes.guidelines.modified, &self.changes.star.modified)
    }
}

/// One cited identifier and where it is cited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactEntry {
    /// The identifier.
    pub id: String,
    /// Every citing location as `file [context, ...]`.
    pub locations: Vec<String>,
}

/// Outcome of cross-referencing a drift report with the curriculum.
///
/// Field order is the escalation order consumers rely on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImpactReport {
    /// Removed upstream but still cited.
    pub broken_references: Vec<ImpactEntry>,
    /// Modified upstream and cited.
    pub semantic_drift: Vec<ImpactEntry>,
    /// Changed upstream but not cited anywhere.
    pub no_impact_changes: Vec<String>,
    /// Distinct files named by any entry.
    pub affected_components: BTreeSet<String>,
}

impl ImpactReport {
    /// Number of distinct affected files.
    #[must_use]
    pub fn total_affected_files(&self) -> usize {
        self.affected_components.len()
    }

    /// Returns `true` if any cited identifier changed.
    #[must_use]
    pub fn has_impact(&self) -> bool {
        !self.broken_references.is_empty() || !self.semantic_drift.is_empty()
    }
}

/// Classifies every removed and modified identifier against the index.
#[must_use]
pub fn analyze_impact(input: &DriftInput, index: &CurriculumIndex) -> ImpactReport {
    let mut report = ImpactReport::default();

    for id in input.removed() {
        match index.get(&id) {
            Some(hits) => {
                let entry = cited_entry(&mut report.affected_components, id, hits);
                report.broken_references.push(entry);
            }
            None => report.no_impact_changes.push(id),
        }
    }
    for id in input.modified() {
        match index.get(&id) {
            Some(hits) => {
                let entry = cited_entry(&mut report.affected_components, id, hits);
                report.semantic_drift.push(entry);
            }
            None => report.no_impact_changes.push(id),
        }
    }

    report
}

fn cited_entry(affected: &mut BTreeSet<String>, id: String, hits: &[Occurrence]) -> ImpactEntry {
    affected.extend(hits.iter().map(|hit| hit.file.clone()));
    ImpactEntry { id, locations: hits.iter().map(Occurrence::location).collect() }
}

fn union(first: &[String], second: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    first.iter().chain(second).filter(|id| seen.insert(id.as_str())).cloned().collect()
}

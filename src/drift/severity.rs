//! Severity policy for a drift run.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::diff::DiffResult;

/// Overall severity of a drift report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Asset or narrative changes only, or nothing.
    Low,
    /// Identifiers added or modified.
    Medium,
    /// Identifiers removed; curriculum links may be broken.
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        })
    }
}

/// Classifies a run. First matching rule wins: any removal is HIGH, any
/// addition or modification is MEDIUM, anything else is LOW.
///
/// Asset hash changes and narrative section changes never raise severity above LOW.
#[must_use]
pub fn classify(guidelines: &DiffResult, star: &DiffResult) -> Severity {
    let families = [guidelines, star];
    if families.iter().any(|d| !d.removed.is_empty()) {
        Severity::High
    } else if families.iter().any(|d| !d.added.is_empty() || !d.modified.is_empty()) {
        Severity::Medium
    } else {
        Severity::Low
    }
}

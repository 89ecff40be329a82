//! Text rendering of an [`ImpactReport`].

use super::{ImpactEntry, ImpactReport};

/// Formats an impact report: broken references, then semantic drift, then the
/// no-impact count and the affected-file summary.
#[must_use]
pub fn format_impact_report(report: &ImpactReport) -> String {
    let mut lines = vec!["impact_analysis:".to_string()];

    lines.push("  broken_references: # CRITICAL: ID removed but used in content".to_string());
    push_entries(&mut lines, &report.broken_references);

    lines.push("  semantic_drift: # WARN: Logic changed upstream, review content".to_string());
    push_entries(&mut lines, &report.semantic_drift);

    lines.push("  no_impact_changes:".to_string());
    lines.push(format!("    count: {}", report.no_impact_changes.len()));

    lines.push("  summary:".to_string());
    lines.push(format!("    total_affected_files: {}", report.total_affected_files()));

    lines.join("\n")
}

fn push_entries(lines: &mut Vec<String>, entries: &[ImpactEntry]) {
    for entry in entries {
        lines.push(format!("    - id: \"{}\"", entry.id));
        lines.push("      locations:".to_string());
        for location in &entry.locations {
            lines.push(format!("        - \"{location}\""));
        }
    }
}

//! Text rendering of a [`DriftReport`].

use super::{DiffResult, DriftReport};

/// Formats a drift report in its fixed key order.
///
/// ```text
/// analysis_date: "..."
/// severity: HIGH
/// comparison:
///   from_snapshot: "..."
///   to_snapshot: "..."
/// changes:
///   guidelines:       {added, removed, modified}
///   star_techniques:  {added, removed, modified}
///   narratives:
///     modified_sections: [...]
///   assets: [] | list of {file, change, old, new}
/// ```
#[must_use]
pub fn format_drift_report(report: &DriftReport) -> String {
    let mut lines = vec![
        format!("analysis_date: \"{}\"", report.analysis_date),
        format!("severity: {}", report.severity),
        "comparison:".to_string(),
        format!("  from_snapshot: \"{}\"", report.comparison.from_snapshot),
        format!("  to_snapshot: \"{}\"", report.comparison.to_snapshot),
        "changes:".to_string(),
    ];

    push_diff(&mut lines, "guidelines", &report.changes.guidelines);
    push_diff(&mut lines, "star_techniques", &report.changes.star);

    lines.push("  narratives:".to_string());
    lines.push(format!("    modified_sections: {}", inline_list(&report.changes.narratives)));

    lines.push("  assets:".to_string());
    if report.changes.assets.is_empty() {
        lines.push("    []".to_string());
    }
    for asset in &report.changes.assets {
        lines.push(format!("    - file: \"{}\"", asset.file));
        lines.push("      change: hash_mismatch".to_string());
        lines.push(format!("      old: {}", quoted_or_tilde(asset.old.as_deref())));
        lines.push(format!("      new: {}", quoted_or_tilde(asset.new.as_deref())));
    }

    lines.join("\n")
}

fn push_diff(lines: &mut Vec<String>, label: &str, diff: &DiffResult) {
    lines.push(format!("  {label}:"));
    lines.push(format!("    added: {}", inline_list(&diff.added)));
    lines.push(format!("    removed: {}", inline_list(&diff.removed)));
    lines.push(format!("    modified: {}", inline_list(&diff.modified)));
}

fn inline_list(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}

fn quoted_or_tilde(value: Option<&str>) -> String {
    value.map_or_else(|| "~".to_string(), |v| format!("\"{v}\""))
}

//! Scheduled drift monitoring: baseline, fetch latest, compare, report.
//!
//! The exit-code contract is what external schedulers key on:
//! 0 when the baseline was just created or nothing changed, 1 when drift was
//! found and a report written, 2 when fetching or comparing failed.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::drift::{detect_drift, format_drift_report, Changes, Severity};
use crate::error::DriftError;
use crate::snapshot::fetch::fetch_snapshot;
use crate::snapshot::{load_snapshot, save_snapshot};

/// Exit code for any failure during a monitor run.
pub const FAILURE_EXIT_CODE: u8 = 2;

/// How a monitor run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// No baseline existed; one was fetched and saved.
    BaselineCreated,
    /// Latest matches the baseline.
    NoChange,
    /// Drift found; the report was written.
    Changes {
        /// Severity of the detected drift.
        severity: Severity,
    },
}

impl MonitorOutcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::BaselineCreated | Self::NoChange => 0,
            Self::Changes { .. } => 1,
        }
    }
}

/// Drift report file written when changes are found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorReport {
    /// When the comparison ran.
    pub analysis_date: String,
    /// Derived severity.
    pub severity: Severity,
    /// Baseline snapshot path.
    pub baseline_snapshot: String,
    /// Latest snapshot path.
    pub latest_snapshot: String,
    /// Text form of the drift report.
    pub raw_analysis: String,
    /// Follow-up actions for content maintainers.
    pub recommended_actions: Vec<String>,
    /// Structured changes, readable by the impact analysis.
    pub changes: Changes,
}

/// Follow-up actions for a given severity.
#[must_use]
pub fn recommended_actions(severity: Severity) -> Vec<String> {
    let actions: &[&str] = match severity {
        Severity::High => &[
            "URGENT: Review removed guidelines/techniques",
            "Update affected lessons and quizzes",
            "Check for broken links in content",
        ],
        Severity::Medium => &[
            "Review modified content",
            "Consider adding new lessons for new techniques",
            "Update WSG_REFERENCES.yaml if needed",
        ],
        Severity::Low => &["Review changes for minor updates"],
    };
    actions.iter().map(ToString::to_string).collect()
}

/// Runs one monitoring pass, printing progress to stdout.
///
/// # Errors
///
/// Returns [`DriftError::Fetch`] if an upstream document cannot be fetched, or
/// any snapshot load, comparison, or write error. Callers map every error to
/// [`FAILURE_EXIT_CODE`].
pub async fn run_monitor(
    ctx: &ServiceContext,
    config: &Config,
) -> Result<MonitorOutcome, DriftError> {
    let paths = &config.snapshots;
    println!("=== WSG Monitor - Drift Detection ===");
    println!();
    println!("Timestamp: {}", ctx.clock.now_iso());
    println!();

    if !ctx.fs.exists(&paths.baseline) {
        println!("No baseline snapshot found. Creating initial baseline...");
        let baseline = fetch_snapshot(ctx, &config.sources).await?;
        save_snapshot(ctx.fs.as_ref(), &paths.baseline, &baseline)?;
        info!(path = %paths.baseline.display(), "baseline created");
        println!("Baseline created. Run monitor again to check for changes.");
        return Ok(MonitorOutcome::BaselineCreated);
    }

    println!("Fetching latest WSG snapshot...");
    let latest = fetch_snapshot(ctx, &config.sources).await?;
    save_snapshot(ctx.fs.as_ref(), &paths.latest, &latest)?;

    println!();
    println!("Comparing snapshots...");
    let baseline = load_snapshot(ctx.fs.as_ref(), &paths.baseline)?;
    let latest = load_snapshot(ctx.fs.as_ref(), &paths.latest)?;
    let drift = detect_drift(&baseline, &latest, ctx.clock.now_iso());
    let raw_analysis = format_drift_report(&drift);

    println!();
    println!("=== Results ===");
    println!("Severity: {}", drift.severity);

    if !drift.has_changes() {
        println!("No changes detected");
        println!();
        println!("WSG content is up to date with baseline.");
        return Ok(MonitorOutcome::NoChange);
    }

    println!();
    println!("CHANGES DETECTED");
    println!();
    println!("Full analysis:");
    println!();
    println!("{raw_analysis}");

    let report = MonitorReport {
        analysis_date: drift.analysis_date.clone(),
        severity: drift.severity,
        baseline_snapshot: paths.baseline.display().to_string(),
        latest_snapshot: paths.latest.display().to_string(),
        raw_analysis,
        recommended_actions: recommended_actions(drift.severity),
        changes: drift.changes,
    };
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| DriftError::json("monitor report", e))?;
    ctx.fs
        .write(&paths.report, &json)
        .map_err(|e| DriftError::io("write", &paths.report, &e))?;
    println!();
    println!("Drift report saved to: {}", paths.report.display());

    println!();
    println!("Recommended actions:");
    for action in &report.recommended_actions {
        println!("  - {action}");
    }
    println!();
    println!("Next steps:");
    println!("  1. Review the drift report");
    println!("  2. Update affected content files");
    println!("  3. Run: content-mapper {}", paths.report.display());
    println!(
        "  4. Update baseline: cp {} {}",
        paths.latest.display(),
        paths.baseline.display()
    );

    Ok(MonitorOutcome::Changes { severity: report.severity })
}

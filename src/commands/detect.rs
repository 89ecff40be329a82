//! `wsg-drift detect` command.

use std::path::Path;

use crate::cli::OutputFormat;
use crate::context::ServiceContext;
use crate::drift::{detect_drift, format_drift_report};
use crate::error::DriftError;
use crate::snapshot::load_snapshot;

/// Execute the `detect` command.
///
/// Prints the drift report between two snapshot files to stdout.
///
/// # Errors
///
/// Returns an error if either snapshot is missing or unparseable.
pub fn run(
    ctx: &ServiceContext,
    old: &Path,
    new: &Path,
    format: OutputFormat,
) -> Result<u8, DriftError> {
    println!("{}", render(ctx, old, new, format)?);
    Ok(0)
}

/// Compares the two snapshot files and renders the report.
///
/// # Errors
///
/// Returns an error if either snapshot is missing or unparseable.
pub fn render(
    ctx: &ServiceContext,
    old: &Path,
    new: &Path,
    format: OutputFormat,
) -> Result<String, DriftError> {
    let old_snapshot = load_snapshot(ctx.fs.as_ref(), old)?;
    let new_snapshot = load_snapshot(ctx.fs.as_ref(), new)?;
    let report = detect_drift(&old_snapshot, &new_snapshot, ctx.clock.now_iso());

    match format {
        OutputFormat::Text => Ok(format_drift_report(&report)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&report).map_err(|e| DriftError::json("drift report", e))
        }
    }
}

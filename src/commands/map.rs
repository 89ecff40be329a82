//! `wsg-drift map` command.

use std::path::Path;

use crate::cli::OutputFormat;
use crate::config::CurriculumConfig;
use crate::context::ServiceContext;
use crate::curriculum::{build_index, IdentifierScanner};
use crate::error::DriftError;
use crate::impact::{analyze_impact, format_impact_report, DriftInput};

/// Printed when no drift report is given.
pub const USAGE: &str = "Usage: content-mapper <drift-report.json>";

/// Execute the `map` command.
///
/// With no report path, prints usage and succeeds.
///
/// # Errors
///
/// Returns an error if the report is missing or unparseable, or the curriculum
/// cannot be listed.
pub fn run(
    ctx: &ServiceContext,
    curriculum: &CurriculumConfig,
    report: Option<&Path>,
    format: OutputFormat,
) -> Result<u8, DriftError> {
    let Some(path) = report else {
        println!("{USAGE}");
        return Ok(0);
    };
    println!("{}", render(ctx, curriculum, path, format)?);
    Ok(0)
}

/// Indexes the curriculum and renders the impact of the drift report at `path`.
///
/// # Errors
///
/// Returns an error if the report is missing or unparseable, or the curriculum
/// cannot be listed.
pub fn render(
    ctx: &ServiceContext,
    curriculum: &CurriculumConfig,
    path: &Path,
    format: OutputFormat,
) -> Result<String, DriftError> {
    if !ctx.fs.exists(path) {
        return Err(DriftError::MissingFile(path.to_path_buf()));
    }
    let text = ctx.fs.read_to_string(path).map_err(|e| DriftError::io("read", path, &e))?;
    let input = DriftInput::parse(&text, &path.display().to_string())?;

    let scanner = IdentifierScanner::new()?;
    let index = build_index(ctx.fs.as_ref(), curriculum, &scanner)?;
    let report = analyze_impact(&input, &index);

    match format {
        OutputFormat::Text => Ok(format_impact_report(&report)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&report).map_err(|e| DriftError::json("impact report", e))
        }
    }
}

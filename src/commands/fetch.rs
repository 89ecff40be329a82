//! `wsg-drift fetch` command.

use std::path::Path;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::DriftError;
use crate::snapshot::fetch::fetch_snapshot;
use crate::snapshot::save_snapshot;

use super::block_on;

/// Execute the `fetch` command.
///
/// Writes a fresh snapshot to `output`, or to the configured latest path.
///
/// # Errors
///
/// Returns [`DriftError::Fetch`] if an upstream request fails, or an I/O error
/// if the snapshot cannot be written.
pub fn run(
    ctx: &ServiceContext,
    config: &Config,
    output: Option<&Path>,
) -> Result<u8, DriftError> {
    let output = output.unwrap_or(config.snapshots.latest.as_path());
    let snapshot = block_on(fetch_snapshot(ctx, &config.sources))??;
    save_snapshot(ctx.fs.as_ref(), output, &snapshot)?;
    println!("Snapshot saved to: {}", output.display());
    Ok(0)
}

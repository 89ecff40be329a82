//! Command dispatch and handlers.

pub mod detect;
pub mod fetch;
pub mod map;
pub mod monitor;

use std::future::Future;

use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::DriftError;

/// Dispatch a parsed command to its handler using live adapters.
///
/// Returns the process exit code on success. The monitor never returns an
/// error: its failures, configuration included, map to its own exit code.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the handler fails.
pub fn dispatch(command: &Command) -> Result<u8, DriftError> {
    let ctx = ServiceContext::live();
    let config = Config::from_env(ctx.fs.as_ref());
    if matches!(command, Command::Monitor) {
        return Ok(match config {
            Ok(config) => monitor::run(&ctx, &config),
            Err(err) => monitor::failed(&err),
        });
    }
    dispatch_with_context(command, &ctx, &config?)
}

/// Dispatch a command with the given service context and configuration.
///
/// # Errors
///
/// Returns an error if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &Config,
) -> Result<u8, DriftError> {
    match command {
        Command::Detect { old, new, format } => detect::run(ctx, old, new, *format),
        Command::Map { report, format } => {
            map::run(ctx, &config.curriculum, report.as_deref(), *format)
        }
        Command::Fetch { output } => fetch::run(ctx, config, output.as_deref()),
        Command::Monitor => Ok(monitor::run(ctx, config)),
    }
}

/// Drives a future to completion on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output, DriftError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(DriftError::Runtime)?;
    Ok(runtime.block_on(future))
}

//! `wsg-drift monitor` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::DriftError;
use crate::monitor::{run_monitor, FAILURE_EXIT_CODE};

use super::block_on;

/// Execute the `monitor` command and return its exit code.
///
/// Every failure is reported on stderr and exits with [`FAILURE_EXIT_CODE`].
pub fn run(ctx: &ServiceContext, config: &Config) -> u8 {
    match block_on(run_monitor(ctx, config)) {
        Ok(Ok(outcome)) => outcome.exit_code(),
        Ok(Err(err)) | Err(err) => failed(&err),
    }
}

/// Reports a monitor failure and returns [`FAILURE_EXIT_CODE`].
#[must_use]
pub fn failed(err: &DriftError) -> u8 {
    eprintln!("{err}");
    println!();
    println!("Monitoring failed.");
    FAILURE_EXIT_CODE
}

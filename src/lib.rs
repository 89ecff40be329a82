//! Core library entry for the `wsg-drift` CLI.
//!
//! Detects drift between two snapshots of the Web Sustainability Guidelines
//! and STAR technique catalogs, and maps that drift onto curriculum content
//! that cites the changed identifiers.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod curriculum;
pub mod drift;
pub mod error;
pub mod impact;
pub mod monitor;
pub mod ports;
pub mod snapshot;

#[cfg(test)]
mod testing;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "WSG_LOG";

/// Run the CLI with the provided arguments and return the process exit code.
///
/// Help and version requests exit 0; other argument errors exit 1.
pub fn run<I, T>(args: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let _ = dotenvy::dotenv();

    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            return code;
        }
    };

    init_logging(cli.verbose);
    match commands::dispatch(&cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            err.exit_code()
        }
    }
}

/// Installs the stderr log subscriber; `verbose` forces `debug`.
///
/// A subscriber that is already installed is left in place.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

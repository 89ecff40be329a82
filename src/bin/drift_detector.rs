//! `drift-detector`: Compare two snapshot files and print the drift report.
//!
//! Forwards to `wsg-drift detect`.

use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "drift-detector".to_string());
    let forwarded = [program, "detect".to_string()].into_iter().chain(args);
    ExitCode::from(wsg_drift::run(forwarded))
}

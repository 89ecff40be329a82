//! `wsg-monitor`: Run one scheduled drift-monitoring pass.
//!
//! Forwards to `wsg-drift monitor`.

use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "wsg-monitor".to_string());
    let forwarded = [program, "monitor".to_string()].into_iter().chain(args);
    ExitCode::from(wsg_drift::run(forwarded))
}

//! `content-mapper`: Print the curriculum impact of a drift report.
//!
//! Forwards to `wsg-drift map`.

use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "content-mapper".to_string());
    let forwarded = [program, "map".to_string()].into_iter().chain(args);
    ExitCode::from(wsg_drift::run(forwarded))
}

//! Binary entrypoint for the `wsg-drift` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(wsg_drift::run(std::env::args()))
}

//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `wsg-drift`.
#[derive(Debug, Parser)]
#[command(
    name = "wsg-drift",
    version,
    about = "Detect upstream WSG drift and map its impact on curriculum content"
)]
pub struct Cli {
    /// Log debug diagnostics to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare two snapshots and print a drift report.
    Detect {
        /// Older snapshot file.
        old: PathBuf,
        /// Newer snapshot file.
        new: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Cross-reference a drift report with the curriculum.
    Map {
        /// Drift report JSON file.
        report: Option<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Fetch the upstream catalogs into a snapshot file.
    Fetch {
        /// Destination file (defaults to the configured latest snapshot).
        output: Option<PathBuf>,
    },
    /// Fetch latest, compare with the baseline, and write a report on drift.
    Monitor,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Key-ordered text.
    Text,
    /// JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, OutputFormat};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parses_detect_with_format() {
        let cli = Cli::parse_from(["wsg-drift", "detect", "a.json", "b.json", "--format", "json"]);
        match cli.command {
            Command::Detect { old, new, format } => {
                assert_eq!(old, PathBuf::from("a.json"));
                assert_eq!(new, PathBuf::from("b.json"));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn detect_requires_both_paths() {
        assert!(Cli::try_parse_from(["wsg-drift", "detect", "a.json"]).is_err());
    }

    #[test]
    fn map_report_is_optional() {
        let cli = Cli::parse_from(["wsg-drift", "map"]);
        assert!(matches!(cli.command, Command::Map { report: None, format: OutputFormat::Text }));
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["wsg-drift", "monitor", "--verbose"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Monitor));
    }
}

//! Error taxonomy shared by the drift engine, the impact mapper, and the monitor.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error type used at port boundaries.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by `wsg-drift` operations.
#[derive(Debug, Error)]
pub enum DriftError {
    /// An upstream or snapshot document did not have the expected shape.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// A required file is absent.
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// Fetching an upstream source failed.
    #[error("fetch failed for {url}: {reason}")]
    Fetch {
        /// Source URL that failed.
        url: String,
        /// Transport or HTTP status description.
        reason: String,
    },

    /// Reading or writing a file failed.
    #[error("failed to {action} {}: {reason}", .path.display())]
    Io {
        /// What was being attempted (`read`, `write`, `list`).
        action: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying failure.
        reason: String,
    },

    /// A JSON document could not be parsed or serialized.
    #[error("invalid JSON in {context}: {source}")]
    Json {
        /// What was being parsed.
        context: String,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The configuration file is invalid.
    #[error("invalid configuration in {}: {reason}", .path.display())]
    Config {
        /// Config file path.
        path: PathBuf,
        /// Parser error text.
        reason: String,
    },

    /// An identifier pattern failed to compile.
    #[error("invalid identifier pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The async runtime for network commands could not be started.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl DriftError {
    /// Builds an [`DriftError::Io`] from a port failure.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, err: &PortError) -> Self {
        Self::Io { action, path: path.into(), reason: err.to_string() }
    }

    /// Builds a [`DriftError::Json`] for the given context.
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json { context: context.into(), source }
    }

    /// Process exit code for a failure surfaced by `detect`, `map`, or argument parsing.
    ///
    /// The monitor overrides this: every failure there exits 2.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Fetch { .. } | Self::Runtime(_) => 2,
            _ => 1,
        }
    }
}

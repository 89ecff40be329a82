//! Runtime configuration: upstream sources, snapshot paths, curriculum layout.
//!
//! Resolution order: built-in defaults, then `wsg-drift.yaml` (or the file named
//! by `WSG_CONFIG`) when present, then the `WSG_GUIDELINES_URL` and
//! `WSG_STAR_URL` environment variables.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DriftError;
use crate::ports::filesystem::FileSystem;

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "wsg-drift.yaml";

const DEFAULT_GUIDELINES_URL: &str =
    "https://raw.githubusercontent.com/w3c/sustainableweb-wsg/main/guidelines.json";
const DEFAULT_STAR_URL: &str =
    "https://raw.githubusercontent.com/w3c/sustainableweb-wsg/main/star.json";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upstream document URLs.
    pub sources: SourceConfig,
    /// Where the monitor keeps its snapshots and report.
    pub snapshots: SnapshotPaths,
    /// Which curriculum files the content mapper scans.
    pub curriculum: CurriculumConfig,
}

/// Upstream document URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Guidelines JSON URL.
    pub guidelines: String,
    /// STAR techniques JSON URL.
    pub star: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { guidelines: DEFAULT_GUIDELINES_URL.to_string(), star: DEFAULT_STAR_URL.to_string() }
    }
}

/// Monitor file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotPaths {
    /// Baseline snapshot compared against.
    pub baseline: PathBuf,
    /// Most recently fetched snapshot.
    pub latest: PathBuf,
    /// Drift report written when changes are found.
    pub report: PathBuf,
}

impl Default for SnapshotPaths {
    fn default() -> Self {
        Self {
            baseline: PathBuf::from("snapshots/baseline.json"),
            latest: PathBuf::from("snapshots/latest.json"),
            report: PathBuf::from("drift-report.json"),
        }
    }
}

/// Curriculum layout scanned by the content mapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurriculumConfig {
    /// Structured files always included by explicit path.
    pub config_files: Vec<PathBuf>,
    /// Content trees walked recursively.
    pub content_dirs: Vec<PathBuf>,
    /// Extension a lesson file must end with.
    pub extension: String,
}

impl Default for CurriculumConfig {
    fn default() -> Self {
        Self {
            config_files: vec![PathBuf::from("MODULES.yaml"), PathBuf::from("TRACKS.yaml")],
            content_dirs: vec![PathBuf::from("liascript_courses")],
            extension: ".md".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from `path` if it exists, otherwise defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DriftError::Config`] if the file exists but is not valid YAML
    /// for this schema, or [`DriftError::Io`] if it cannot be read.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, DriftError> {
        if !fs.exists(path) {
            return Ok(Self::default());
        }
        let text = fs.read_to_string(path).map_err(|e| DriftError::io("read", path, &e))?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&text)
            .map_err(|e| DriftError::Config { path: path.to_path_buf(), reason: e.to_string() })
    }

    /// Loads configuration from `WSG_CONFIG` (or the default path) and applies
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Config::load`].
    pub fn from_env(fs: &dyn FileSystem) -> Result<Self, DriftError> {
        let path = env::var("WSG_CONFIG")
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
        let mut config = Self::load(fs, &path)?;
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// Applies source URL overrides from a key lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("WSG_GUIDELINES_URL").filter(|u| !u.is_empty()) {
            self.sources.guidelines = url;
        }
        if let Some(url) = lookup("WSG_STAR_URL").filter(|u| !u.is_empty()) {
            self.sources.star = url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemFs;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load(&MemFs::new(), Path::new("wsg-drift.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.snapshots.baseline, PathBuf::from("snapshots/baseline.json"));
        assert_eq!(config.curriculum.extension, ".md");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let fs = MemFs::new().with_file(
            "wsg-drift.yaml",
            "curriculum:\n  content_dirs: [courses, extras]\nsnapshots:\n  report: out/report.json\n",
        );
        let config = Config::load(&fs, Path::new("wsg-drift.yaml")).unwrap();

        assert_eq!(
            config.curriculum.content_dirs,
            vec![PathBuf::from("courses"), PathBuf::from("extras")]
        );
        assert_eq!(config.curriculum.config_files.len(), 2);
        assert_eq!(config.snapshots.report, PathBuf::from("out/report.json"));
        assert_eq!(config.snapshots.latest, PathBuf::from("snapshots/latest.json"));
        assert_eq!(config.sources, SourceConfig::default());
    }

    #[test]
    fn invalid_yaml_is_config_error() {
        let fs = MemFs::new().with_file("wsg-drift.yaml", "curriculum: [not, a, map]\n");
        let err = Config::load(&fs, Path::new("wsg-drift.yaml")).unwrap_err();
        assert!(matches!(err, DriftError::Config { .. }));
    }

    #[test]
    fn env_overrides_replace_source_urls() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "WSG_STAR_URL" => Some("http://localhost/star.json".to_string()),
            "WSG_GUIDELINES_URL" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.sources.star, "http://localhost/star.json");
        assert_eq!(config.sources.guidelines, DEFAULT_GUIDELINES_URL);
    }
}

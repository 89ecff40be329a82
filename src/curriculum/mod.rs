//! Curriculum index: where each guideline or technique identifier is cited.
//!
//! Built fresh on every analysis run from the current curriculum files and
//! never persisted. Scanning is read-only.

pub mod scanner;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::CurriculumConfig;
use crate::error::DriftError;
use crate::ports::filesystem::FileSystem;

pub use scanner::{FileHit, IdentifierScanner, GLOBAL_CONTEXT};

/// One file citing an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// File path as scanned.
    pub file: String,
    /// Distinct module contexts within the file.
    pub contexts: Vec<String>,
}

impl Occurrence {
    /// `file [ctx1, ctx2]`.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{} [{}]", self.file, self.contexts.join(", "))
    }
}

/// Identifier -> files (with contexts) that cite it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurriculumIndex {
    entries: BTreeMap<String, Vec<Occurrence>>,
}

impl CurriculumIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans one file's text and records its hits under `file`.
    pub fn add_file(&mut self, scanner: &IdentifierScanner, file: &str, content: &str) {
        for FileHit { id, contexts } in scanner.scan(content) {
            self.entries
                .entry(id)
                .or_default()
                .push(Occurrence { file: file.to_string(), contexts });
        }
    }

    /// Occurrences of `id`, if it is cited anywhere.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&[Occurrence]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    /// Number of distinct identifiers cited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no identifiers were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Scans the curriculum described by `config` and builds its index.
///
/// Config files are included by explicit path; content directories are walked
/// recursively for files ending in the configured extension. Missing files and
/// directories are skipped. An existing file that cannot be read is logged and
/// skipped.
///
/// # Errors
///
/// Returns [`DriftError::Io`] if an existing content directory cannot be listed.
pub fn build_index(
    fs: &dyn FileSystem,
    config: &CurriculumConfig,
    scanner: &IdentifierScanner,
) -> Result<CurriculumIndex, DriftError> {
    let files = curriculum_files(fs, config)?;
    let mut index = CurriculumIndex::new();

    for path in &files {
        // Text is decoded lossily, so only I/O failures land here.
        let content = match fs.read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!(file = %path.display(), %err, "skipping unreadable curriculum file");
                continue;
            }
        };
        debug!(file = %path.display(), bytes = content.len(), "indexing");
        index.add_file(scanner, &path.display().to_string(), &content);
    }

    debug!(files = files.len(), identifiers = index.len(), "curriculum indexed");
    Ok(index)
}

/// Lists the files to scan: existing config files first, then content files.
///
/// # Errors
///
/// Returns [`DriftError::Io`] if an existing directory cannot be listed.
pub fn curriculum_files(
    fs: &dyn FileSystem,
    config: &CurriculumConfig,
) -> Result<Vec<PathBuf>, DriftError> {
    let mut files: Vec<PathBuf> = Vec::new();

    for path in &config.config_files {
        if fs.exists(path) && !fs.is_dir(path) {
            files.push(path.clone());
        } else {
            debug!(file = %path.display(), "config file absent");
        }
    }
    for dir in &config.content_dirs {
        collect_files(fs, dir, &config.extension, &mut files)?;
    }

    let mut seen = HashSet::new();
    files.retain(|path| seen.insert(path.clone()));
    Ok(files)
}

fn collect_files(
    fs: &dyn FileSystem,
    dir: &Path,
    extension: &str,
    out: &mut Vec<PathBuf>,
) -> Result<(), DriftError> {
    if !fs.is_dir(dir) {
        debug!(dir = %dir.display(), "content directory absent");
        return Ok(());
    }
    let entries = fs.list_dir(dir).map_err(|e| DriftError::io("list", dir, &e))?;
    for name in entries {
        let path = dir.join(&name);
        if fs.is_dir(&path) {
            collect_files(fs, &path, extension, out)?;
        } else if name.ends_with(extension) {
            out.push(path);
        }
    }
    Ok(())
}

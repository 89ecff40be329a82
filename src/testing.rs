//! In-memory adapters shared by unit tests.

use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::context::ServiceContext;
use crate::error::PortError;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::source::{FetchFuture, SnapshotSource};

/// In-memory filesystem. Directories exist implicitly when a file lives under them.
#[derive(Clone, Default)]
pub struct MemFs {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, contents: &str) -> Self {
        self.files.lock().unwrap().insert(PathBuf::from(path), contents.to_string());
        self
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }
}

impl FileSystem for MemFs {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files.lock().unwrap().keys().any(|p| p != path && p.starts_with(path))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError> {
        let files = self.files.lock().unwrap();
        let mut entries: Vec<String> = files
            .keys()
            .filter_map(|p| p.strip_prefix(path).ok())
            .filter_map(|rest| match rest.components().next() {
                Some(Component::Normal(name)) => name.to_str().map(String::from),
                _ => None,
            })
            .collect();
        if entries.is_empty() {
            return Err(format!("Not a directory: {}", path.display()).into());
        }
        entries.sort();
        entries.dedup();
        Ok(entries)
    }
}

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at_noon() -> Self {
        Self(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Source that serves canned bodies by URL; unknown URLs fail with HTTP 404.
#[derive(Default)]
pub struct CannedSource {
    bodies: HashMap<String, String>,
}

impl CannedSource {
    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }
}

impl SnapshotSource for CannedSource {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        let result = self.bodies.get(url).cloned().ok_or_else(|| PortError::from("HTTP 404"));
        Box::pin(async move { result })
    }
}

/// Builds a context over the given fakes with a fixed clock.
pub fn context(fs: MemFs, source: CannedSource) -> ServiceContext {
    ServiceContext::new(Box::new(FixedClock::at_noon()), Box::new(fs), Box::new(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_fs_lists_immediate_children() {
        let fs = MemFs::new()
            .with_file("courses/a.md", "")
            .with_file("courses/track/b.md", "")
            .with_file("MODULES.yaml", "");

        assert_eq!(fs.list_dir(Path::new("courses")).unwrap(), vec!["a.md", "track"]);
        assert!(fs.is_dir(Path::new("courses/track")));
        assert!(!fs.is_dir(Path::new("courses/a.md")));
        assert!(fs.exists(Path::new("MODULES.yaml")));
        assert!(fs.list_dir(Path::new("missing")).is_err());
    }
}

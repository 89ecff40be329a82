//! Normalized WSG snapshots: the on-disk format, its loader, and the fetcher
//! that produces it.
//!
//! A snapshot file looks like:
//!
//! ```text
//! {
//!   "timestamp": "2026-03-01T12:00:00.000Z",
//!   "sources": { "guidelines": "<url>", "star": "<url>" },
//!   "guidelines": [ { "id", "name", "guidelines": [...] } ],
//!   "star": [ { "id", "name", "techniques": [...] } ],
//!   "narratives": { "policy": ..., "benefits": ..., ... },
//!   "hashes": { "guidelines": "<sha256>", "star": "<sha256>" }
//! }
//! ```
//!
//! `guidelines`, `star`, `narratives`, and `hashes` are kept as raw JSON so a
//! partially malformed file still loads; shape checks happen in [`normalize`].

pub mod fetch;
pub mod normalize;
pub mod upstream;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::DriftError;
use crate::ports::filesystem::FileSystem;

pub use normalize::{normalize_snapshot, Fingerprints, NormalizedSnapshot};

/// A normalized snapshot of the upstream guideline and STAR catalogs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// When the snapshot was taken (ISO 8601).
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub timestamp: Option<String>,
    /// URLs the snapshot was fetched from.
    #[serde(deserialize_with = "lenient")]
    pub sources: Sources,
    /// Guideline categories, each with a `guidelines` array.
    pub guidelines: Value,
    /// STAR categories, each with a `techniques` array.
    pub star: Value,
    /// Prose sections keyed by name.
    pub narratives: Value,
    /// Content digests keyed by file name.
    pub hashes: Value,
}

/// Upstream source URLs recorded in a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sources {
    /// Guidelines document URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidelines: Option<String>,
    /// STAR document URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star: Option<String>,
}

impl Snapshot {
    /// Timestamp for display, `unknown` when absent.
    #[must_use]
    pub fn timestamp_or_unknown(&self) -> &str {
        self.timestamp.as_deref().unwrap_or("unknown")
    }
}

/// Loads and parses a snapshot file.
///
/// Only unparseable JSON is fatal. A root that is not an object loads as an
/// empty snapshot, and a mistyped `timestamp` or `sources` reads as absent.
///
/// # Errors
///
/// Returns [`DriftError::MissingFile`] if the file is absent, [`DriftError::Io`]
/// if it cannot be read, or [`DriftError::Json`] if it is not JSON.
pub fn load_snapshot(fs: &dyn FileSystem, path: &Path) -> Result<Snapshot, DriftError> {
    if !fs.exists(path) {
        return Err(DriftError::MissingFile(path.to_path_buf()));
    }
    let text = fs.read_to_string(path).map_err(|e| DriftError::io("read", path, &e))?;
    let doc: Value = serde_json::from_str(&text)
        .map_err(|e| DriftError::json(path.display().to_string(), e))?;
    if !doc.is_object() {
        warn!(file = %path.display(), "snapshot root is not an object; treating as empty");
        return Ok(Snapshot::default());
    }
    serde_json::from_value(doc).map_err(|e| DriftError::json(path.display().to_string(), e))
}

/// Deserializes `T`, falling back to its default when the value has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Writes a snapshot as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_snapshot(
    fs: &dyn FileSystem,
    path: &Path,
    snapshot: &Snapshot,
) -> Result<(), DriftError> {
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| DriftError::json(path.display().to_string(), e))?;
    fs.write(path, &json).map_err(|e| DriftError::io("write", path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemFs;

    #[test]
    fn loads_sparse_snapshot_with_defaults() {
        let fs = MemFs::new().with_file("old.json", r#"{"guidelines": []}"#);
        let snapshot = load_snapshot(&fs, Path::new("old.json")).unwrap();

        assert_eq!(snapshot.timestamp_or_unknown(), "unknown");
        assert_eq!(snapshot.guidelines, Value::Array(vec![]));
        assert!(snapshot.star.is_null());
        assert!(snapshot.hashes.is_null());
    }

    #[test]
    fn mistyped_envelope_fields_read_as_absent() {
        let fs = MemFs::new().with_file(
            "a.json",
            r#"{"timestamp": 20260101, "sources": null, "guidelines": [{"id": "3"}]}"#,
        );
        let snapshot = load_snapshot(&fs, Path::new("a.json")).unwrap();

        assert_eq!(snapshot.timestamp_or_unknown(), "unknown");
        assert_eq!(snapshot.sources, Sources::default());
        assert_eq!(snapshot.guidelines[0]["id"], "3");
    }

    #[test]
    fn null_timestamp_and_partial_sources() {
        let fs = MemFs::new().with_file(
            "a.json",
            r#"{"timestamp": null, "sources": {"guidelines": "https://g", "star": 7}}"#,
        );
        let snapshot = load_snapshot(&fs, Path::new("a.json")).unwrap();

        assert_eq!(snapshot.timestamp, None);
        assert_eq!(snapshot.sources, Sources::default());
    }

    #[test]
    fn non_object_root_is_empty_snapshot() {
        let fs = MemFs::new().with_file("a.json", "[1, 2, 3]");
        let snapshot = load_snapshot(&fs, Path::new("a.json")).unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn missing_snapshot_is_missing_file() {
        let err = load_snapshot(&MemFs::new(), Path::new("nope.json")).unwrap_err();
        assert!(matches!(err, DriftError::MissingFile(_)));
    }

    #[test]
    fn unparseable_snapshot_is_json_error() {
        let fs = MemFs::new().with_file("bad.json", "{ not json");
        let err = load_snapshot(&fs, Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, DriftError::Json { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn save_then_load_preserves_timestamp() {
        let fs = MemFs::new();
        let snapshot = Snapshot {
            timestamp: Some("2026-03-01T12:00:00.000Z".into()),
            ..Snapshot::default()
        };
        save_snapshot(&fs, Path::new("snapshots/latest.json"), &snapshot).unwrap();

        let loaded = load_snapshot(&fs, Path::new("snapshots/latest.json")).unwrap();
        assert_eq!(loaded.timestamp_or_unknown(), "2026-03-01T12:00:00.000Z");
    }
}

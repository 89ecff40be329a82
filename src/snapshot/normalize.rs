//! Flattens nested category documents into identifier -> fingerprint maps.
//!
//! Guidelines are keyed `WSG-{category}.{guideline}`; the guideline id alone is
//! not unique. Techniques are keyed by their own id. The fingerprint is the
//! canonical JSON of the full record and is only ever compared for equality.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use crate::error::DriftError;

use super::Snapshot;

/// Identifier -> canonical fingerprint.
pub type Fingerprints = BTreeMap<String, String>;

/// Key wrapping the category list in raw upstream documents.
pub const CATEGORY_WRAPPER_KEY: &str = "category";

/// Both identifier families of one snapshot, flattened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSnapshot {
    /// `WSG-x.y` -> fingerprint.
    pub guidelines: Fingerprints,
    /// Technique id -> fingerprint.
    pub techniques: Fingerprints,
}

/// Flattens both families of a snapshot.
///
/// A family whose document is malformed degrades to an empty map (with a
/// warning) so narrative and asset comparison can still proceed.
#[must_use]
pub fn normalize_snapshot(snapshot: &Snapshot) -> NormalizedSnapshot {
    let guidelines = guideline_fingerprints(&snapshot.guidelines).unwrap_or_else(|err| {
        warn!(%err, "guidelines degraded to empty");
        Fingerprints::new()
    });
    let techniques = technique_fingerprints(&snapshot.star).unwrap_or_else(|err| {
        warn!(%err, "STAR techniques degraded to empty");
        Fingerprints::new()
    });
    NormalizedSnapshot { guidelines, techniques }
}

/// Returns the category list of a document, unwrapping a `category` key.
///
/// `null` (an absent family) is an empty list.
///
/// # Errors
///
/// Returns [`DriftError::MalformedSnapshot`] if the root is not list-shaped.
pub fn categories(doc: &Value) -> Result<&[Value], DriftError> {
    let root = match doc {
        Value::Object(map) => map.get(CATEGORY_WRAPPER_KEY).unwrap_or(doc),
        _ => doc,
    };
    match root {
        Value::Array(items) => Ok(items.as_slice()),
        Value::Null => Ok(&[][..]),
        other => Err(DriftError::MalformedSnapshot(format!(
            "expected a category list, found {}",
            kind(other)
        ))),
    }
}

/// Flattens guideline categories into `WSG-{category}.{guideline}` fingerprints.
///
/// # Errors
///
/// Returns [`DriftError::MalformedSnapshot`] if the root is not list-shaped.
pub fn guideline_fingerprints(doc: &Value) -> Result<Fingerprints, DriftError> {
    let mut map = Fingerprints::new();
    for category in categories(doc)? {
        let Some(category_id) = category.get("id").and_then(id_text) else {
            warn!("skipping guideline category without an id");
            continue;
        };
        for guideline in children(category, "guidelines") {
            let Some(guideline_id) = guideline.get("id").and_then(id_text) else {
                warn!(category = %category_id, "skipping guideline without an id");
                continue;
            };
            map.insert(guideline_key(&category_id, &guideline_id), canonical_json(guideline));
        }
    }
    Ok(map)
}

/// Flattens STAR categories into technique-id fingerprints.
///
/// # Errors
///
/// Returns [`DriftError::MalformedSnapshot`] if the root is not list-shaped.
pub fn technique_fingerprints(doc: &Value) -> Result<Fingerprints, DriftError> {
    let mut map = Fingerprints::new();
    for category in categories(doc)? {
        for technique in children(category, "techniques") {
            let Some(id) = technique.get("id").and_then(id_text) else {
                warn!("skipping technique without an id");
                continue;
            };
            map.insert(id, canonical_json(technique));
        }
    }
    Ok(map)
}

/// Compound guideline identifier.
#[must_use]
pub fn guideline_key(category_id: &str, guideline_id: &str) -> String {
    format!("WSG-{category_id}.{guideline_id}")
}

/// Serializes a value with object keys sorted at every depth.
#[must_use]
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, val)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(val, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Child records of a category; anything but an array is empty.
fn children<'a>(category: &'a Value, key: &str) -> &'a [Value] {
    category.get(key).and_then(Value::as_array).map_or(&[][..], Vec::as_slice)
}

/// Textual form of a record id. Strings are used verbatim, numbers in decimal.
pub(crate) fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

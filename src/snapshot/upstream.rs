//! Typed view of the upstream `guidelines.json` and `star.json` documents.
//!
//! Deserializing through these types is what normalizes a raw document: only
//! the listed fields are kept, absent or `null` collections become empty, and
//! defaulted text fields become `""`. Fields with no default stay absent.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A guideline category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidelineCategory {
    /// Category code, e.g. `"3"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    /// Guidelines in this category.
    #[serde(default, deserialize_with = "null_as_default")]
    pub guidelines: Vec<Guideline>,
}

/// A single guideline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Guideline {
    /// Guideline code within its category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Guideline title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guideline: Option<Value>,
    /// Canonical URL.
    #[serde(default = "empty_string", deserialize_with = "null_as_empty_string")]
    pub url: Value,
    /// Success criteria.
    #[serde(default, deserialize_with = "null_as_default")]
    pub criteria: Vec<Criterion>,
}

/// A success criterion of a guideline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Criterion title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    /// Criterion description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    /// Classification tags.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Value>,
    /// Benefit ratings keyed by dimension.
    #[serde(default, deserialize_with = "null_as_default")]
    pub benefits: Map<String, Value>,
    /// Further reading.
    #[serde(default, deserialize_with = "null_as_default")]
    pub resources: Vec<Value>,
}

/// A STAR category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StarCategory {
    /// Category code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    /// Techniques in this category.
    #[serde(default, deserialize_with = "null_as_default")]
    pub techniques: Vec<Technique>,
}

/// A STAR technique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Technique {
    /// Technique code, e.g. `"UX01-1"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Technique title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    /// Where the technique applies.
    #[serde(default = "empty_string", deserialize_with = "null_as_empty_string")]
    pub applicability: Value,
    /// Description paragraphs.
    #[serde(default = "empty_array", deserialize_with = "null_as_empty_array")]
    pub description: Value,
    /// Test procedures.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tests: Vec<TechniqueTest>,
    /// Worked examples.
    #[serde(default, deserialize_with = "null_as_default")]
    pub examples: Vec<Value>,
}

/// A test procedure of a technique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechniqueTest {
    /// Steps to perform.
    #[serde(default = "empty_string", deserialize_with = "null_as_empty_string")]
    pub procedure: Value,
    /// What passing looks like.
    #[serde(
        rename = "expectedResults",
        default = "empty_string",
        deserialize_with = "null_as_empty_string"
    )]
    pub expected_results: Value,
}

fn empty_string() -> Value {
    Value::String(String::new())
}

fn empty_array() -> Value {
    Value::Array(Vec::new())
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_empty_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.unwrap_or_else(empty_string))
}

fn null_as_empty_array<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.unwrap_or_else(empty_array))
}

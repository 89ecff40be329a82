//! Builds a normalized snapshot from the live upstream documents.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::config::SourceConfig;
use crate::context::ServiceContext;
use crate::error::DriftError;

use super::normalize::categories;
use super::upstream::{GuidelineCategory, StarCategory};
use super::{Snapshot, Sources};

/// Fetches both upstream documents and assembles a normalized snapshot.
///
/// Guidelines are fetched first, then STAR; one request each, no retry.
///
/// # Errors
///
/// Returns [`DriftError::Fetch`] if either request fails or a body is not JSON.
pub async fn fetch_snapshot(
    ctx: &ServiceContext,
    sources: &SourceConfig,
) -> Result<Snapshot, DriftError> {
    let mut hashes = Map::new();

    info!(url = %sources.guidelines, "fetching guidelines");
    let (guidelines_raw, guidelines_hash) = fetch_document(ctx, &sources.guidelines).await?;
    hashes.insert("guidelines".to_string(), Value::String(guidelines_hash));
    let guidelines = normalize_categories::<GuidelineCategory>(&guidelines_raw, "guidelines");

    info!(url = %sources.star, "fetching STAR techniques");
    let (star_raw, star_hash) = fetch_document(ctx, &sources.star).await?;
    hashes.insert("star".to_string(), Value::String(star_hash));
    let star = normalize_categories::<StarCategory>(&star_raw, "star");

    info!(
        guideline_categories = guidelines.len(),
        star_categories = star.len(),
        "snapshot assembled"
    );

    Ok(Snapshot {
        timestamp: Some(ctx.clock.now_iso()),
        sources: Sources {
            guidelines: Some(sources.guidelines.clone()),
            star: Some(sources.star.clone()),
        },
        guidelines: Value::Array(guidelines),
        star: Value::Array(star),
        narratives: Value::Object(Map::new()),
        hashes: Value::Object(hashes),
    })
}

/// Fetches one document, returning the parsed body and the SHA-256 of the raw bytes.
async fn fetch_document(ctx: &ServiceContext, url: &str) -> Result<(Value, String), DriftError> {
    let body = ctx
        .source
        .fetch(url)
        .await
        .map_err(|e| DriftError::Fetch { url: url.to_string(), reason: e.to_string() })?;
    let digest = sha256_hex(body.as_bytes());
    let doc = serde_json::from_str(&body).map_err(|e| DriftError::Fetch {
        url: url.to_string(),
        reason: format!("response is not JSON: {e}"),
    })?;
    Ok((doc, digest))
}

/// Lowercase hex SHA-256 digest.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Re-serializes each category through its typed form.
///
/// A non-list root yields no categories; a category that does not fit the
/// typed form is skipped. Both are logged.
fn normalize_categories<T>(doc: &Value, family: &str) -> Vec<Value>
where
    T: DeserializeOwned + Serialize,
{
    let raw = match categories(doc) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(family, %err, "upstream document has no category list");
            return Vec::new();
        }
    };

    raw.iter()
        .enumerate()
        .filter_map(|(position, category)| {
            serde_json::from_value::<T>(category.clone())
                .and_then(serde_json::to_value)
                .map_err(|err| warn!(family, position, %err, "skipping malformed category"))
                .ok()
        })
        .collect()
}

//! Upstream source port for fetching raw guideline documents.

use std::future::Future;
use std::pin::Pin;

use crate::error::PortError;

/// Boxed future returned by [`SnapshotSource::fetch`], keeping the trait dyn-compatible.
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<String, PortError>> + Send + 'a>>;

/// Fetches the raw body of an upstream document.
///
/// One request per call; no retry. A non-success HTTP status is an error.
pub trait SnapshotSource: Send + Sync {
    /// Fetches `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a>;
}

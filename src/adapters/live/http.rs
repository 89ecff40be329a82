//! Live adapter for the `SnapshotSource` port using `reqwest`.

use reqwest::Client;

use crate::error::PortError;
use crate::ports::source::{FetchFuture, SnapshotSource};

/// Fetches upstream documents over HTTPS.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Creates a new HTTP source with a default client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotSource for HttpSource {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| -> PortError { format!("request failed: {e}").into() })?;

            let status = response.status();
            if status != reqwest::StatusCode::OK {
                return Err(format!("HTTP {}", status.as_u16()).into());
            }

            response
                .text()
                .await
                .map_err(|e| -> PortError { format!("failed to read response body: {e}").into() })
        })
    }
}

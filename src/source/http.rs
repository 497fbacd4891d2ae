//! HTTP fetcher for the pipeline's metrics endpoint.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{FetchError, SnapshotFetcher};
use crate::data::MetricsSnapshot;

/// Path of the metrics endpoint, relative to the server base URL.
pub const METRICS_PATH: &str = "/metrics";

/// Fetches snapshots with `GET {endpoint}/metrics`.
///
/// No timeout is applied: a hung request delays only its own cycle. The
/// response status is not checked; an error response whose body still
/// decodes as a snapshot is rendered, and any other body fails as
/// [`FetchError::Parse`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    url: String,
    description: String,
}

impl HttpFetcher {
    /// Create a fetcher for the server at `endpoint` (e.g. `http://localhost:8080`).
    pub fn new(endpoint: &str) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Create a fetcher that reuses an existing client.
    pub fn with_client(client: Client, endpoint: &str) -> Self {
        let url = format!("{}{}", endpoint.trim_end_matches('/'), METRICS_PATH);
        let description = format!("http: {}", url);
        Self {
            client,
            url,
            description,
        }
    }

    /// The full URL being polled.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SnapshotFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<MetricsSnapshot, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!(url = %self.url, %status, "metrics endpoint returned non-success status");
        }

        let body = response.bytes().await?;
        Ok(MetricsSnapshot::from_slice(&body)?)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

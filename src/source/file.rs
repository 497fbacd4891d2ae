//! File-based fetcher.
//!
//! Reads a captured `/metrics` response from disk on every call.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{FetchError, SnapshotFetcher};
use crate::data::MetricsSnapshot;

/// A fetcher that decodes a snapshot from a JSON file.
///
/// Unlike a change-watching source, the file is re-read on every cycle, so
/// each cycle renders whatever the file holds at that moment.
#[derive(Debug)]
pub struct FileFetcher {
    path: PathBuf,
    description: String,
}

impl FileFetcher {
    /// Create a new file fetcher for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotFetcher for FileFetcher {
    async fn fetch(&self) -> Result<MetricsSnapshot, FetchError> {
        let content = tokio::fs::read(&self.path).await?;
        Ok(MetricsSnapshot::from_slice(&content)?)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

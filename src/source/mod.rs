//! Snapshot fetching.
//!
//! This module provides a trait-based abstraction over where metrics
//! snapshots come from. The dashboard normally polls the pipeline's HTTP
//! endpoint; a file-backed fetcher replays a captured response.

mod error;
mod file;
mod http;

pub use error::FetchError;
pub use file::FileFetcher;
pub use http::{HttpFetcher, METRICS_PATH};

use std::fmt::Debug;

use async_trait::async_trait;

use crate::data::MetricsSnapshot;

/// Produces one metrics snapshot per call.
///
/// Implementations issue exactly one request (or read) per call, never
/// retry, and never touch shared state. A call either yields a complete
/// snapshot or fails as a whole.
///
/// # Example
///
/// ```no_run
/// use joinwatch::{HttpFetcher, SnapshotFetcher};
///
/// # tokio_test::block_on(async {
/// let fetcher = HttpFetcher::new("http://localhost:8080");
/// match fetcher.fetch().await {
///     Ok(snapshot) => println!("{} partitions", snapshot.join_watermarks.len()),
///     Err(e) => eprintln!("fetch failed: {}", e),
/// }
/// # });
/// ```
#[async_trait]
pub trait SnapshotFetcher: Send + Sync + Debug {
    /// Fetch and decode the current snapshot.
    async fn fetch(&self) -> Result<MetricsSnapshot, FetchError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used in log entries and the TUI status bar.
    fn description(&self) -> &str;
}

//! # joinwatch
//!
//! A terminal dashboard for the health of a streaming join pipeline that
//! merges ad-click and page-view streams by partition and watermark.
//!
//! Once a second the dashboard fetches a metrics snapshot from the
//! pipeline's `/metrics` endpoint and projects it onto a set of display
//! targets: throughput counters, state sizes, a last-updated indicator and a
//! per-partition watermark table that is rebuilt from scratch every cycle.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐  tick   ┌─────────────────┐  Ok   ┌──────────┐
//! │ scheduler │───────▶│ SnapshotFetcher │──────▶│  render  │──▶ Board
//! │ (1000 ms) │ spawn   │  (http / file)  │       │          │     │
//! └───────────┘         └────────┬────────┘       └──────────┘     │
//!                                │ Err: warn!, display left stale  ▼
//!                                                          ui (ratatui)
//! ```
//!
//! - **[`data`]**: Snapshot wire types and timestamp formatting
//! - **[`source`]**: The [`SnapshotFetcher`] trait with HTTP and file
//!   implementations
//! - **[`render`]**: The [`DisplayTargets`] trait, the in-memory [`Board`]
//!   and the [`render()`](render::render) function
//! - **[`scheduler`]**: The fixed-period loop with overlapping cycles
//! - **[`ui`]**, **[`app`]**, **[`events`]**: Terminal front end
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll http://localhost:8080/metrics
//! joinwatch
//!
//! # Poll another server
//! joinwatch --endpoint http://pipeline.internal:8080
//!
//! # Replay a captured response
//! joinwatch --file metrics.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use joinwatch::{render, Board, MetricsSnapshot, Target};
//!
//! let snapshot: MetricsSnapshot =
//!     serde_json::from_str(r#"{"clicksReceived": 42, "joinWatermarks": []}"#).unwrap();
//! let mut board = Board::new();
//! render(&snapshot, &mut board);
//! assert_eq!(board.text(Target::ClicksReceived), Some("42"));
//! assert_eq!(board.text(Target::PageViewsEmitted), Some("0"));
//! ```
//!
//! ### Driving the loop
//!
//! ```no_run
//! use std::sync::{Arc, Mutex};
//! use joinwatch::{Board, HttpFetcher, Scheduler};
//!
//! # tokio_test::block_on(async {
//! let board = Arc::new(Mutex::new(Board::new()));
//! let fetcher = Arc::new(HttpFetcher::new("http://localhost:8080"));
//! let handle = Scheduler::new(fetcher, board.clone()).start();
//! // ... later
//! handle.stop();
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod export;
pub mod logging;
pub mod render;
pub mod scheduler;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{format_timestamp, MetricsSnapshot, Partition, Timestamp, WatermarkRow};
pub use render::{render, Board, DisplayTargets, Target};
pub use scheduler::{Scheduler, SchedulerHandle, REFRESH_PERIOD};
pub use source::{FetchError, FileFetcher, HttpFetcher, SnapshotFetcher};

//! Data model for metrics snapshots.
//!
//! ## Submodules
//!
//! - [`snapshot`]: Wire types decoded from the `/metrics` endpoint
//!   ([`MetricsSnapshot`], [`WatermarkRow`], [`Partition`])
//! - [`timestamp`]: Interpretation of epoch-millisecond / ISO-8601 instants
//!   and the two display formats used by the dashboard
//!
//! ## Data Flow
//!
//! ```text
//! GET /metrics (JSON)
//!        │
//!        ▼
//! MetricsSnapshot (lenient decode)
//!        │
//!        ▼
//! render::render() ──▶ format_timestamp() per watermark cell
//! ```

pub mod snapshot;
pub mod timestamp;

pub use snapshot::{MetricsSnapshot, Partition, WatermarkRow};
pub use timestamp::{format_iso_instant, format_timestamp, Timestamp, PLACEHOLDER};

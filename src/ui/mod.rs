//! Terminal UI rendering using ratatui.
//!
//! The UI is a read-only view of the shared [`Board`](crate::render::Board):
//! each frame clones the board and draws it. Nothing here writes display
//! targets.
//!
//! ## Submodules
//!
//! - [`dashboard`]: Counter and state-size panels plus the watermark table
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────┬───────────────────┤
//! │ Throughput       │ State             │
//! ├──────────────────┴───────────────────┤
//! │ Join watermarks table                │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!    Overlay rendered on top: common::render_help
//! ```

pub mod common;
pub mod dashboard;
pub mod theme;

pub use theme::Theme;

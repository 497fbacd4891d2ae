//! Application state for the terminal UI.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError};
use std::time::{Duration, Instant};

use crate::export::{self, DEFAULT_EXPORT_PATH};
use crate::render::Board;
use crate::scheduler::{CycleCounts, CycleStats, SharedTargets};
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
///
/// The app only reads the shared board; every write to it comes from a
/// scheduler cycle.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    board: SharedTargets<Board>,
    stats: Arc<CycleStats>,
    source_description: String,
    export_path: PathBuf,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from the given board.
    pub fn new(
        board: SharedTargets<Board>,
        stats: Arc<CycleStats>,
        source_description: impl Into<String>,
    ) -> Self {
        Self::with_theme(board, stats, source_description, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme (no terminal detection).
    pub fn with_theme(
        board: SharedTargets<Board>,
        stats: Arc<CycleStats>,
        source_description: impl Into<String>,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            show_help: false,
            board,
            stats,
            source_description: source_description.into(),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current snapshot source.
    pub fn source_description(&self) -> &str {
        &self.source_description
    }

    /// A copy of the board as it is right now.
    ///
    /// The lock is held only for the clone, never while drawing.
    pub fn board(&self) -> Board {
        self.board
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn cycle_counts(&self) -> CycleCounts {
        self.stats.counts()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Set where `e` writes its export.
    pub fn set_export_path(&mut self, path: impl Into<PathBuf>) {
        self.export_path = path.into();
    }

    /// Export the current board and report the result in the status bar.
    pub fn export(&mut self) {
        let message = match export::write_board(&self.board(), &self.export_path) {
            Ok(()) => format!("Exported to {}", self.export_path.display()),
            Err(e) => format!("Export failed: {:#}", e),
        };
        self.set_status_message(message);
    }
}

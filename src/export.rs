//! Export of the rendered board to a JSON file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::render::{render, Board};
use crate::source::SnapshotFetcher;

/// Default destination for exports triggered from the TUI.
pub const DEFAULT_EXPORT_PATH: &str = "joinwatch_export.json";

/// Write the board (text targets and watermark rows) as pretty JSON.
pub fn write_board(board: &Board, path: &Path) -> Result<()> {
    let json = board.to_json_pretty()?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Fetch one snapshot, render it into a fresh board and write the board.
///
/// A failed fetch is an error and nothing is written.
pub async fn export_snapshot(fetcher: &dyn SnapshotFetcher, path: &Path) -> Result<Board> {
    let snapshot = fetcher
        .fetch()
        .await
        .with_context(|| format!("failed to fetch from {}", fetcher.description()))?;

    let mut board = Board::new();
    render(&snapshot, &mut board);
    write_board(&board, path)?;
    Ok(board)
}

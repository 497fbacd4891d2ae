//! In-memory display targets.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{DisplayTargets, Target};

/// Cells of one watermark table row: partition, page-view max event time,
/// ad-click max event time, join watermark.
pub type RowCells = [String; 4];

/// The in-memory set of display targets.
///
/// A fresh board has no text in any target (nothing has been rendered yet)
/// and an empty table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Board {
    targets: BTreeMap<Target, String>,
    rows: Vec<RowCells>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of a target, or `None` if it was never written.
    pub fn text(&self, target: Target) -> Option<&str> {
        self.targets.get(&target).map(String::as_str)
    }

    /// Watermark table rows in display order.
    pub fn rows(&self) -> &[RowCells] {
        &self.rows
    }

    /// True until the first successful render.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty() && self.rows.is_empty()
    }

    /// Serialize the board as pretty-printed JSON, keyed by bind name.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl DisplayTargets for Board {
    fn set_text(&mut self, target: Target, text: &str) {
        self.targets.insert(target, text.to_string());
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
    }

    fn append_row(&mut self, cells: RowCells) {
        self.rows.push(cells);
    }
}

//! Projection of a metrics snapshot onto display targets.
//!
//! The renderer never reaches for global state: it is handed a
//! [`DisplayTargets`] implementation and writes every value through it.
//! [`Board`] is the in-memory implementation drawn by the terminal UI and
//! inspected by tests.
//!
//! Rendering is a full replace. Every call overwrites all seven text targets
//! and rebuilds the watermark table from scratch, so nothing about a row
//! survives from one cycle to the next.

mod board;

pub use board::{Board, RowCells};

use serde::Serialize;

use crate::data::{
    format_iso_instant, format_timestamp, MetricsSnapshot, WatermarkRow, PLACEHOLDER,
};

/// Named text targets the renderer writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Target {
    ClicksReceived,
    PageViewsReceived,
    PageViewsEmitted,
    PageViewsUpdated,
    ClickStateSize,
    PageViewStateSize,
    LastUpdatedAt,
}

impl Target {
    /// All targets, in display order.
    pub const ALL: [Target; 7] = [
        Target::ClicksReceived,
        Target::PageViewsReceived,
        Target::PageViewsEmitted,
        Target::PageViewsUpdated,
        Target::ClickStateSize,
        Target::PageViewStateSize,
        Target::LastUpdatedAt,
    ];

    /// The bind name used by the metrics payload for this target.
    pub fn id(&self) -> &'static str {
        match self {
            Target::ClicksReceived => "clicksReceived",
            Target::PageViewsReceived => "pageViewsReceived",
            Target::PageViewsEmitted => "pageViewsEmitted",
            Target::PageViewsUpdated => "pageViewsUpdated",
            Target::ClickStateSize => "clickStateSize",
            Target::PageViewStateSize => "pageViewStateSize",
            Target::LastUpdatedAt => "lastUpdatedAt",
        }
    }

    /// Human-readable label for the terminal UI.
    pub fn label(&self) -> &'static str {
        match self {
            Target::ClicksReceived => "Clicks received",
            Target::PageViewsReceived => "Page views received",
            Target::PageViewsEmitted => "Page views emitted",
            Target::PageViewsUpdated => "Page views updated",
            Target::ClickStateSize => "Click state",
            Target::PageViewStateSize => "Page view state",
            Target::LastUpdatedAt => "Last updated",
        }
    }
}

/// A writable set of display targets plus a watermark table.
///
/// Each [`Target`] maps to exactly one text slot. The table supports only
/// clear-and-append of rows with four ordered text cells.
pub trait DisplayTargets {
    /// Replace the text of a single target.
    fn set_text(&mut self, target: Target, text: &str);

    /// Remove every row from the watermark table.
    fn clear_rows(&mut self);

    /// Append one row to the end of the watermark table.
    fn append_row(&mut self, cells: RowCells);
}

/// Write a snapshot to the given display targets.
///
/// Counters and state sizes default to `0` when missing. The last-updated
/// indicator is rendered as a full ISO-8601 instant, while table timestamps
/// use the compact `YYYY-MM-DD HH:MM:SS` form; both fall back to the
/// placeholder glyph.
pub fn render<T>(snapshot: &MetricsSnapshot, targets: &mut T)
where
    T: DisplayTargets + ?Sized,
{
    let counters = [
        (Target::ClicksReceived, snapshot.clicks_received),
        (Target::PageViewsReceived, snapshot.page_views_received),
        (Target::PageViewsEmitted, snapshot.page_views_emitted),
        (Target::PageViewsUpdated, snapshot.page_views_updated),
        (Target::ClickStateSize, snapshot.click_state_size),
        (Target::PageViewStateSize, snapshot.page_view_state_size),
    ];
    for (target, value) in counters {
        targets.set_text(target, &value.unwrap_or(0).to_string());
    }

    targets.set_text(
        Target::LastUpdatedAt,
        &format_iso_instant(snapshot.last_updated_at.as_ref()),
    );

    targets.clear_rows();
    for row in &snapshot.join_watermarks {
        targets.append_row(row_cells(row));
    }
}

/// Build the four table cells for one watermark entry.
pub fn row_cells(row: &WatermarkRow) -> RowCells {
    [
        row.partition
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        format_timestamp(row.page_views_max_event_time.as_ref()),
        format_timestamp(row.ad_clicks_max_event_time.as_ref()),
        format_timestamp(row.join_watermark.as_ref()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// 2024-01-15T09:05:03Z
    const SAMPLE_MS: i64 = 1_705_309_503_000;

    fn snapshot(value: serde_json::Value) -> MetricsSnapshot {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_render_end_to_end() {
        let snap = snapshot(json!({
            "clicksReceived": 42,
            "joinWatermarks": [{
                "partition": "p0",
                "pageViewsMaxEventTime": SAMPLE_MS,
                "adClicksMaxEventTime": null,
                "joinWatermark": null
            }]
        }));

        let mut board = Board::new();
        render(&snap, &mut board);

        assert_eq!(board.text(Target::ClicksReceived), Some("42"));
        assert_eq!(board.rows().len(), 1);
        assert_eq!(
            board.rows()[0],
            [
                "p0".to_string(),
                "2024-01-15 09:05:03".to_string(),
                "—".to_string(),
                "—".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_counters_render_zero() {
        let mut board = Board::new();
        render(&MetricsSnapshot::default(), &mut board);

        for target in Target::ALL {
            if target == Target::LastUpdatedAt {
                continue;
            }
            assert_eq!(board.text(target), Some("0"), "{}", target.id());
        }
    }

    #[test]
    fn test_last_updated_placeholder_and_iso() {
        let mut board = Board::new();
        render(&MetricsSnapshot::default(), &mut board);
        assert_eq!(board.text(Target::LastUpdatedAt), Some("—"));

        render(&snapshot(json!({ "lastUpdatedAt": SAMPLE_MS })), &mut board);
        assert_eq!(
            board.text(Target::LastUpdatedAt),
            Some("2024-01-15T09:05:03.000Z")
        );
    }

    #[test]
    fn test_empty_watermarks_clear_previous_rows() {
        let mut board = Board::new();
        render(
            &snapshot(json!({ "joinWatermarks": [{"partition": 0}, {"partition": 1}] })),
            &mut board,
        );
        assert_eq!(board.rows().len(), 2);

        let empty = snapshot(json!({ "joinWatermarks": [] }));
        render(&empty, &mut board);
        assert!(board.rows().is_empty());
        render(&empty, &mut board);
        assert!(board.rows().is_empty());
    }

    #[test]
    fn test_rows_are_rebuilt_not_appended() {
        let snap = snapshot(json!({
            "joinWatermarks": [{"partition": 0}, {"partition": 1}, {"partition": 2}]
        }));
        let mut board = Board::new();
        render(&snap, &mut board);
        render(&snap, &mut board);
        assert_eq!(board.rows().len(), 3);
    }

    #[test]
    fn test_row_order_follows_input() {
        let snap = snapshot(json!({
            "joinWatermarks": [{"partition": 9}, {"partition": "b"}, {"partition": 1}]
        }));
        let mut board = Board::new();
        render(&snap, &mut board);

        let partitions: Vec<&str> = board.rows().iter().map(|r| r[0].as_str()).collect();
        assert_eq!(partitions, vec!["9", "b", "1"]);
    }

    #[test]
    fn test_timestamp_cells_are_independent() {
        let snap = snapshot(json!({
            "joinWatermarks": [
                {"partition": 0, "pageViewsMaxEventTime": 0, "adClicksMaxEventTime": SAMPLE_MS, "joinWatermark": null},
                {"partition": 1, "pageViewsMaxEventTime": null, "adClicksMaxEventTime": 0, "joinWatermark": "2024-01-15T09:05:03Z"},
                {"partition": 2, "pageViewsMaxEventTime": SAMPLE_MS}
            ]
        }));
        let mut board = Board::new();
        render(&snap, &mut board);

        let formatted = "2024-01-15 09:05:03";
        assert_eq!(board.rows()[0][1..], ["—", formatted, "—"]);
        assert_eq!(board.rows()[1][1..], ["—", "—", formatted]);
        assert_eq!(board.rows()[2][1..], [formatted, "—", "—"]);
    }

    #[test]
    fn test_partition_zero_is_shown_and_missing_is_placeholder() {
        let snap = snapshot(json!({
            "joinWatermarks": [{"partition": 0}, {"partition": null}, {}]
        }));
        let mut board = Board::new();
        render(&snap, &mut board);

        assert_eq!(board.rows()[0][0], "0");
        assert_eq!(board.rows()[1][0], "—");
        assert_eq!(board.rows()[2][0], "—");
    }

    #[test]
    fn test_render_is_idempotent() {
        let snap = snapshot(json!({
            "clicksReceived": 5,
            "pageViewStateSize": 12,
            "lastUpdatedAt": "2024-01-15T09:05:03Z",
            "joinWatermarks": [{"partition": 0, "joinWatermark": SAMPLE_MS}]
        }));
        let mut board = Board::new();
        render(&snap, &mut board);
        let first = board.clone();
        render(&snap, &mut board);
        assert_eq!(board, first);
    }

    #[test]
    fn test_render_through_trait_object() {
        let mut board = Board::new();
        let targets: &mut dyn DisplayTargets = &mut board;
        render(&snapshot(json!({ "pageViewsEmitted": 3 })), targets);
        assert_eq!(board.text(Target::PageViewsEmitted), Some("3"));
    }

    #[test]
    fn test_target_ids_match_payload_fields() {
        let ids: Vec<&str> = Target::ALL.iter().map(Target::id).collect();
        assert_eq!(
            ids,
            vec![
                "clicksReceived",
                "pageViewsReceived",
                "pageViewsEmitted",
                "pageViewsUpdated",
                "clickStateSize",
                "pageViewStateSize",
                "lastUpdatedAt",
            ]
        );
    }
}

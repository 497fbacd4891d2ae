//! Dashboard view: counters, state sizes and the join watermark table.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::render::{Board, Target};

const THROUGHPUT: [Target; 4] = [
    Target::ClicksReceived,
    Target::PageViewsReceived,
    Target::PageViewsEmitted,
    Target::PageViewsUpdated,
];

const STATE: [Target; 2] = [Target::ClickStateSize, Target::PageViewStateSize];

const TABLE_HEADERS: [&str; 4] = [
    "Partition",
    "Page views max event time",
    "Ad clicks max event time",
    "Join watermark",
];

/// Height of the counter panels, borders included.
pub const PANEL_HEIGHT: u16 = THROUGHPUT.len() as u16 + 2;

/// Render the counter panels above the watermark table.
pub fn render(frame: &mut Frame, app: &App, board: &Board, area: Rect) {
    let [panels, table] =
        Layout::vertical([Constraint::Length(PANEL_HEIGHT), Constraint::Min(3)]).areas(area);
    let [throughput, state] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .areas(panels);

    render_panel(frame, app, board, " Throughput ", &THROUGHPUT, throughput);
    render_panel(frame, app, board, " State ", &STATE, state);
    render_watermarks(frame, app, board, table);
}

fn block<'a>(app: &App, title: String) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

fn render_panel(
    frame: &mut Frame,
    app: &App,
    board: &Board,
    title: &str,
    targets: &[Target],
    area: Rect,
) {
    let label_width = targets.iter().map(|t| t.label().len()).max().unwrap_or(0);

    let lines: Vec<Line> = targets
        .iter()
        .map(|target| {
            // Nothing rendered yet: show an ellipsis rather than a value
            let (text, style) = match board.text(*target) {
                Some(text) => (text, app.theme.value_style(text)),
                None => ("…", app.theme.placeholder),
            };
            Line::from(vec![
                Span::styled(
                    format!(" {:<width$}  ", target.label(), width = label_width),
                    app.theme.label,
                ),
                Span::styled(text.to_string(), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block(app, title.to_string())), area);
}

fn render_watermarks(frame: &mut Frame, app: &App, board: &Board, area: Rect) {
    let header = Row::new(TABLE_HEADERS.iter().map(|h| Cell::from(*h)))
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = board
        .rows()
        .iter()
        .map(|cells| {
            Row::new(
                cells
                    .iter()
                    .map(|text| Cell::from(text.clone()).style(app.theme.value_style(text))),
            )
        })
        .collect();

    let widths = [
        Constraint::Fill(1), // Partition
        Constraint::Fill(2), // Page views max event time
        Constraint::Fill(2), // Ad clicks max event time
        Constraint::Fill(2), // Join watermark
    ];

    let title = format!(" Join watermarks ({}) ", board.rows().len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(block(app, title));

    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    use crate::render::render as render_snapshot;
    use crate::scheduler::CycleStats;
    use crate::ui::Theme;

    fn screen_text(board: Board) -> String {
        let shared = Arc::new(Mutex::new(board));
        let app = App::with_theme(
            shared.clone(),
            Arc::new(CycleStats::default()),
            "test",
            Theme::dark(),
        );
        let board = app.board();

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|frame| render(frame, &app, &board, frame.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_draws_counters_and_rows() {
        let snapshot = serde_json::from_value(json!({
            "clicksReceived": 42,
            "pageViewStateSize": 9,
            "joinWatermarks": [{"partition": "p0", "pageViewsMaxEventTime": 1_705_309_503_000_i64}]
        }))
        .unwrap();
        let mut board = Board::new();
        render_snapshot(&snapshot, &mut board);

        let text = screen_text(board);
        assert!(text.contains("Clicks received"));
        assert!(text.contains("42"));
        assert!(text.contains("Join watermarks (1)"));
        assert!(text.contains("p0"));
        assert!(text.contains("2024-01-15 09:05:03"));
    }

    #[test]
    fn test_draws_loading_state() {
        let text = screen_text(Board::new());
        assert!(text.contains("…"));
        assert!(text.contains("Join watermarks (0)"));
    }
}

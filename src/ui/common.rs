//! Common UI components: header bar, status bar and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::PLACEHOLDER;
use crate::render::{Board, Target};

/// Render the header bar with the title and last-updated indicator.
pub fn render_header(frame: &mut Frame, app: &App, board: &Board, area: Rect) {
    let title = Span::styled(
        " JOIN PIPELINE ",
        Style::default()
            .fg(app.theme.highlight)
            .add_modifier(Modifier::BOLD),
    );

    let line = if board.is_empty() {
        Line::from(vec![title, Span::raw("│ Loading...")])
    } else {
        let updated = board.text(Target::LastUpdatedAt).unwrap_or(PLACEHOLDER);
        Line::from(vec![
            title,
            Span::raw("│ "),
            Span::styled(
                format!("{}: ", Target::LastUpdatedAt.label()),
                app.theme.label,
            ),
            Span::styled(updated.to_string(), app.theme.value_style(updated)),
            Span::raw(" │ "),
            Span::raw(format!("{} partitions", board.rows().len())),
        ])
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows the snapshot source, the number of cycles triggered and the
/// available controls, or a temporary status message.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let counts = app.cycle_counts();
    let status = format!(
        " {} | {} cycles | e:export ?:help q:quit",
        app.source_description(),
        counts.started,
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  e         Export board to JSON"),
        Line::from("  ?         Toggle this help"),
        Line::from("  q / Esc   Quit"),
        Line::from(""),
        Line::from("  Metrics refresh every second."),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 11u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

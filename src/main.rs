use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::{error, info};

use joinwatch::config::{Overrides, Settings};
use joinwatch::{events, export, logging, ui};
use joinwatch::{App, Board, FileFetcher, HttpFetcher, Scheduler, SnapshotFetcher};

#[derive(Parser, Debug)]
#[command(name = "joinwatch")]
#[command(about = "Terminal dashboard for a streaming ad-click / page-view join pipeline")]
struct Args {
    /// Base URL of the pipeline server (GET <endpoint>/metrics is polled)
    #[arg(short = 'u', long, conflicts_with = "file")]
    endpoint: Option<String>,

    /// Read snapshots from a JSON file instead of the HTTP endpoint
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file (the terminal is reserved for the dashboard)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch one snapshot, write the rendered board to this JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load(
        args.config.as_deref(),
        Overrides {
            endpoint: args.endpoint.clone(),
            log_file: args.log_file.clone(),
        },
    )
    .context("failed to load configuration")?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = match logging::init(&settings.log_file) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: logging disabled: {}", e);
            None
        }
    };

    let fetcher: Arc<dyn SnapshotFetcher> = match args.file {
        Some(ref path) => Arc::new(FileFetcher::new(path)),
        None => Arc::new(HttpFetcher::new(&settings.endpoint)),
    };

    let rt = tokio::runtime::Runtime::new()?;

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        rt.block_on(export::export_snapshot(fetcher.as_ref(), export_path))?;
        println!("Exported dashboard state to: {}", export_path.display());
        return Ok(());
    }

    run_dashboard(&rt, fetcher)
}

/// Start the scheduler on the runtime and run the TUI on this thread.
fn run_dashboard(rt: &tokio::runtime::Runtime, fetcher: Arc<dyn SnapshotFetcher>) -> Result<()> {
    let board = Arc::new(Mutex::new(Board::new()));
    let description = fetcher.description().to_string();

    let handle = {
        let _enter = rt.enter();
        Scheduler::new(fetcher, board.clone()).start()
    };
    info!(source = %description, "dashboard started");

    let app = App::new(board, handle.stats(), description);
    let result = run_tui(app);

    handle.stop();
    if let Err(ref e) = result {
        error!(error = %e, "dashboard exited with error");
    }
    result
}

/// Run the TUI until the user quits
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 14;

    while app.running {
        let board = app.board();

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    5.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(8),    // Dashboard
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, &board, chunks[0]);
            ui::dashboard::render(frame, app, &board, chunks[1]);
            ui::common::render_status_bar(frame, app, chunks[2]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Redraw at least every 100ms so new renders show up promptly
        if let Some(Event::Key(key)) = events::poll_event(Duration::from_millis(100))? {
            events::handle_key_event(app, key);
        }
    }

    Ok(())
}

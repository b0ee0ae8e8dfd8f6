//! Contact TUI - terminal front-end for the studio site's contact form
//!
//! A Ratatui-based form that collects a name, email, optional company and
//! message, and hands them to the remote delivery endpoint.

mod app;
mod config;
mod controller;
mod delivery;
mod error;
mod notify;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use config::ContactConfig;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

/// Redraw interval; also drives toast expiry and the reset countdown
const TICK_RATE: Duration = Duration::from_millis(100);

// Single-threaded: delivery and reset tasks share the UI's thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();

    let config = ContactConfig::load()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(&config);
    tracing::info!(endpoint = %app.controller.endpoint_name(), "contact form ready");
    let result = run_app(&mut terminal, &mut app).await;
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file in the data directory; the terminal belongs to the UI
fn init_logging() {
    let writer = ContactConfig::log_dir()
        .and_then(|dir| {
            fs::create_dir_all(&dir).ok()?;
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join("contact-tui.log"))
                .ok()
        })
        .map(|file| BoxMakeWriter::new(Mutex::new(file)))
        .unwrap_or_else(|| BoxMakeWriter::new(io::sink));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contact_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK_RATE);

    loop {
        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => return Ok(()),
            },
            event = app.controller.next_event() => app.apply_submission_event(event),
            _ = tick.tick() => app.tick(),
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}

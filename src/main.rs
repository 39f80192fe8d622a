//! Content Form - terminal form for composing publishable content
//!
//! A Ratatui-based TUI for entering a blog post, product listing or event
//! with a repeatable group of entries, validated before submission.

mod app;
mod config;
mod platform;
mod sink;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use config::FormConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, config_error) = match FormConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (FormConfig::default(), Some(e)),
    };

    // Initialize logging to a file; stderr would be drawn over the form
    let log_writer = match FormConfig::log_path().map(|path| FormConfig::open_log(&path)) {
        Some(Ok(file)) => BoxMakeWriter::new(Mutex::new(file)),
        _ => BoxMakeWriter::new(io::sink),
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_writer)
                .with_ansi(false),
        )
        .init();

    if let Some(e) = config_error {
        tracing::warn!("Failed to load config, using defaults: {e}");
    } else if !FormConfig::exists() {
        if let Err(e) = config.save() {
            tracing::warn!("Failed to write default config: {e}");
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(&config);
    let result = run_app(&mut terminal, &mut app).await;

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

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            // Resize needs no handling: the next draw picks up the new size
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key).await?;
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

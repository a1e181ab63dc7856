//! seren - personal wellness journal
//!
//! Terminal UI for logging daily moods, reviewing trends, and talking to
//! the supportive chat companion.

mod app;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use seren_core::{BlobStore, Config};

use crate::app::App;

#[derive(Parser, Debug)]
#[command(name = "seren", about = "Personal wellness journal", version)]
struct Cli {
    /// Path to a config file (defaults to the XDG location)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the journal database (defaults to the XDG location)
    #[arg(long)]
    database: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path).context("failed to load configuration")?,
        None => Config::load().context("failed to load configuration")?,
    };

    // Initialize logging (to file, not stdout since we have a TUI)
    let _log_guard =
        seren_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("seren TUI starting up");

    // Open the blob store
    let db_path = cli.database.unwrap_or_else(Config::database_path);
    tracing::info!(path = %db_path.display(), "Opening journal store");

    let blobs = BlobStore::open(&db_path).context("failed to open journal store")?;
    blobs.migrate().context("failed to run store migrations")?;

    // Create the app: loads persisted state and resolves the reply strategy
    let mut app = App::new(config, blobs).context("failed to initialize app")?;

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    tracing::info!("seren TUI shutting down");

    result
}

/// Run the main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Expire stale toast notices
        app.tick();

        // Render
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

//! popstream - neon TUI for discovering movies and TV shows
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! popstream
//! popstream --at /search
//!
//! # CLI mode (for automation)
//! popstream search "blade runner"
//! popstream trending --kind tv --json
//! popstream route /tv/1396
//! ```

use std::fs::OpenOptions;
use std::io::{stdout, Stdout};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use popstream::api::TmdbClient;
use popstream::app::App;
use popstream::cli::{Cli, Command, ExitCode, Output};
use popstream::commands;
use popstream::config::Config;
use popstream::fetch::{self, FetchResponse};
use popstream::ui;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Event poll interval; also the debounce resolution
const TICK_RATE: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.is_cli_mode());

    let config = Config::load_from(cli.config.as_deref());
    let client = commands::client_from(&config);

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli, &config, &client).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        run_tui(&config, client, cli.at.as_deref()).await
    }
}

/// Log filter from `POPSTREAM_LOG`, then `RUST_LOG`, then `popstream=info`
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("POPSTREAM_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| "popstream=info".into())
}

/// CLI logs go to stderr; the TUI logs to a file so the screen stays clean
fn init_logging(cli_mode: bool) {
    let registry = tracing_subscriber::registry().with(env_filter());

    if cli_mode {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        return;
    }

    let Some(dir) = dirs::cache_dir().map(|d| d.join("popstream")) else {
        return;
    };
    let file = std::fs::create_dir_all(&dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("popstream.log"))
    });
    if let Ok(file) = file {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config, client: &TmdbClient) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, client, &output).await,

        Some(Command::Trending(cmd)) => commands::trending_cmd(cmd, client, &output).await,

        Some(Command::Featured(cmd)) => commands::featured_cmd(cmd, client, &output).await,

        Some(Command::Route(cmd)) => commands::route_cmd(cmd, config, &output),

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: &Config, client: TmdbClient, start: Option<&str>) -> Result<()> {
    if !client.has_credential() {
        warn!("no TMDB credential configured, showing sample data");
    }

    let mut terminal = init_terminal()?;

    let mut app = App::new(config.debounce());
    app.safe_area_bottom = config.safe_area_bottom;
    if let Some(path) = start {
        app.start_at(path);
    }
    info!("tui started");

    let result = run_event_loop(&mut terminal, &mut app, client).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, advances timers, runs fetches, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App, client: TmdbClient) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchResponse>();

    while app.running {
        terminal.draw(|frame| ui::render_ui(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.tick(Instant::now());

        for request in app.take_requests() {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let response = fetch::execute(&client, request).await;
                // Receiver is gone only when the app is shutting down
                let _ = tx.send(response);
            });
        }

        while let Ok(response) = rx.try_recv() {
            if !app.apply(response) {
                debug!("dropped stale fetch response");
            }
        }
    }

    info!("tui stopped");
    Ok(())
}

//! CLI - Command Line Interface for popstream
//!
//! Every TMDB-backed view of the TUI is scriptable. All output is
//! JSON-parseable with `--json` (the default when stdout is not a TTY).
//!
//! # Examples
//!
//! ```bash
//! popstream search "the batman" --kind movie
//! popstream trending --kind tv --limit 5 --json
//! popstream featured --seed 7
//! popstream route /tv/1396
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::models::{ContentKind, SearchKind};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Nothing matched
    NoResults = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// popstream - neon TUI for discovering movies and TV shows
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "popstream",
    version,
    about = "Neon TUI for discovering movies and TV shows on TMDB",
    long_about = "A terminal front end for TMDB: a featured hero banner, \
                  quick search, and route-aware navigation.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  popstream                          Launch interactive TUI\n\
                  popstream search \"blade runner\"    Search movies and TV\n\
                  popstream trending --kind tv       Today's trending series\n\
                  popstream route /movie/27205       Show chrome for a route"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Open the TUI at this location instead of home (e.g. `/tv/1396`)
    #[arg(long, value_name = "PATH")]
    pub at: Option<String>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for movies and TV shows
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Get today's trending pool
    #[command(visible_alias = "tr")]
    Trending(TrendingCmd),

    /// Pick the hero banner's featured item
    #[command(visible_alias = "f")]
    Featured(FeaturedCmd),

    /// Classify a path and show its navigation chrome
    #[command(visible_alias = "r")]
    Route(RouteCmd),
}

/// Search kind filter
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    /// Movies only
    Movie,
    /// TV shows only
    Tv,
    /// Movies and TV shows
    #[default]
    Multi,
}

impl From<KindFilter> for SearchKind {
    fn from(filter: KindFilter) -> Self {
        match filter {
            KindFilter::Movie => SearchKind::Movie,
            KindFilter::Tv => SearchKind::Series,
            KindFilter::Multi => SearchKind::Multi,
        }
    }
}

/// Movie or TV
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentFilter {
    #[default]
    Movie,
    Tv,
}

impl From<ContentFilter> for ContentKind {
    fn from(filter: ContentFilter) -> Self {
        match filter {
            ContentFilter::Movie => ContentKind::Movie,
            ContentFilter::Tv => ContentKind::Series,
        }
    }
}

/// Search for movies and TV shows by query
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    #[arg(required = true)]
    pub query: String,

    /// Which TMDB search endpoint to use
    #[arg(long, short = 'k', value_enum, default_value = "multi")]
    pub kind: KindFilter,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Get today's trending movies or TV shows
#[derive(Args, Debug)]
pub struct TrendingCmd {
    #[arg(long, short = 'k', value_enum, default_value = "movie")]
    pub kind: ContentFilter,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Show what the hero banner would feature
#[derive(Args, Debug)]
pub struct FeaturedCmd {
    #[arg(long, short = 'k', value_enum, default_value = "movie")]
    pub kind: ContentFilter,

    /// Seed for a reproducible pick
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Classify a route
#[derive(Args, Debug)]
pub struct RouteCmd {
    /// Path such as `/`, `/search` or `/tv/1396`
    #[arg(required = true)]
    pub path: String,

    /// Terminal width used to pick the compact or wide layout
    #[arg(long, short = 'w', default_value = "120")]
    pub width: u16,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data wrapped in the JSON envelope
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print one line of human-readable output
    pub fn line(&self, text: impl std::fmt::Display) {
        println!("{}", text);
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

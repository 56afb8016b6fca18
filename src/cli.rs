//! CLI - Command Line Interface for IheNkiri
//!
//! Every list and detail the TUI shows is scriptable. Output is human-readable
//! on a terminal and JSON otherwise (or with `--json`).
//!
//! # Examples
//!
//! ```bash
//! # Browse lists
//! ihenkiri movies --filter top-rated --pages 2
//! ihenkiri tv -f airing-today --json
//!
//! # Details
//! ihenkiri movie 550
//! ihenkiri person 287
//!
//! # Account
//! ihenkiri login
//! ihenkiri theme light
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::api::TmdbError;
use crate::config::ThemeMode;
use crate::models::{MovieFilter, TvShowFilter};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    /// General error
    Error = 1,
    InvalidArgs = 2,
    NetworkError = 3,
    /// TMDB has no such movie/show/person
    NotFound = 4,
    /// Token rejected or login flow failed
    AuthFailed = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<&TmdbError> for ExitCode {
    fn from(err: &TmdbError) -> Self {
        match err {
            TmdbError::NotFound => ExitCode::NotFound,
            TmdbError::Unauthorized => ExitCode::AuthFailed,
            TmdbError::InvalidRequest(_) => ExitCode::InvalidArgs,
            e if e.is_network() => ExitCode::NetworkError,
            _ => ExitCode::Error,
        }
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// IheNkiri - browse movies, TV shows and people from TMDB
///
/// Run without arguments to launch the interactive TUI.
#[derive(Parser, Debug)]
#[command(
    name = "ihenkiri",
    version,
    about = "Browse movies, TV shows and people from TMDB",
    long_about = "Browse TMDB movie, TV show and people lists by category, \
                  view details and manage a TMDB login.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for scripting.",
    after_help = "EXAMPLES:\n\
                  ihenkiri                            Launch interactive TUI\n\
                  ihenkiri movies -f top-rated        Top rated movies\n\
                  ihenkiri movie 550 --json           Movie details as JSON\n\
                  ihenkiri login                      Log in with your TMDB account"
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

    /// Response language, e.g. en-US (overrides config)
    #[arg(long, short = 'L', global = true)]
    pub language: Option<String>,

    /// ISO 3166-1 region, e.g. US (overrides config)
    #[arg(long, short = 'r', global = true)]
    pub region: Option<String>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
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
    /// List movies by category
    #[command(visible_alias = "m")]
    Movies(MoviesCmd),

    /// List TV shows by category
    #[command(visible_alias = "t")]
    Tv(TvCmd),

    /// List popular people
    #[command(visible_alias = "p")]
    People(PeopleCmd),

    /// Show movie details
    Movie(DetailCmd),

    /// Show TV show details
    Show(DetailCmd),

    /// Show person details
    Person(DetailCmd),

    /// Log in with a TMDB account
    Login(LoginCmd),

    /// Start a guest session
    Guest,

    /// Revoke and forget the current session
    Logout,

    /// Show or set the color theme
    Theme(ThemeCmd),

    /// Print current settings
    Settings,
}

// =============================================================================
// List Commands
// =============================================================================

/// Paging options shared by the list commands
#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// Number of pages to fetch
    #[arg(long, short = 'p', default_value = "1", value_parser = clap::value_parser!(u32).range(1..=50))]
    pub pages: u32,

    /// Maximum number of results to print
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct MoviesCmd {
    /// Category to list
    #[arg(long, short = 'f', value_enum, default_value = "now-playing")]
    pub filter: MovieFilterArg,

    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(Args, Debug)]
pub struct TvCmd {
    /// Category to list
    #[arg(long, short = 'f', value_enum, default_value = "airing-today")]
    pub filter: TvFilterArg,

    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(Args, Debug)]
pub struct PeopleCmd {
    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieFilterArg {
    NowPlaying,
    Popular,
    TopRated,
    Upcoming,
    Discover,
}

impl From<MovieFilterArg> for MovieFilter {
    fn from(arg: MovieFilterArg) -> Self {
        match arg {
            MovieFilterArg::NowPlaying => MovieFilter::NowPlaying,
            MovieFilterArg::Popular => MovieFilter::Popular,
            MovieFilterArg::TopRated => MovieFilter::TopRated,
            MovieFilterArg::Upcoming => MovieFilter::Upcoming,
            MovieFilterArg::Discover => MovieFilter::Discover,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvFilterArg {
    AiringToday,
    OnTheAir,
    Popular,
    TopRated,
    Discover,
}

impl From<TvFilterArg> for TvShowFilter {
    fn from(arg: TvFilterArg) -> Self {
        match arg {
            TvFilterArg::AiringToday => TvShowFilter::AiringToday,
            TvFilterArg::OnTheAir => TvShowFilter::OnTheAir,
            TvFilterArg::Popular => TvShowFilter::Popular,
            TvFilterArg::TopRated => TvShowFilter::TopRated,
            TvFilterArg::Discover => TvShowFilter::Discover,
        }
    }
}

// =============================================================================
// Detail / Account Commands
// =============================================================================

#[derive(Args, Debug)]
pub struct DetailCmd {
    /// TMDB id
    #[arg(required = true)]
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct LoginCmd {
    /// URL TMDB redirects to after approval
    #[arg(long)]
    pub redirect_to: Option<String>,
}

#[derive(Args, Debug)]
pub struct ThemeCmd {
    /// New theme; omit to print the current one
    #[arg(value_enum)]
    pub mode: Option<ThemeArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    Dark,
    Light,
    System,
}

impl From<ThemeArg> for ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => ThemeMode::Dark,
            ThemeArg::Light => ThemeMode::Light,
            ThemeArg::System => ThemeMode::System,
        }
    }
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
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Status OK response
#[derive(Debug, Serialize)]
pub struct StatusOk {
    pub status: &'static str,
}

impl Default for StatusOk {
    fn default() -> Self {
        Self { status: "ok" }
    }
}

/// One page-collected list as printed by the list commands
#[derive(Debug, Serialize)]
pub struct ListOutput<T: Serialize> {
    pub category: String,
    pub pages_loaded: u32,
    pub end_reached: bool,
    pub results: Vec<T>,
}

/// Current settings, token redacted
#[derive(Debug, Serialize)]
pub struct SettingsOutput {
    pub config_path: Option<String>,
    pub api_token: Option<String>,
    pub language: String,
    pub region: Option<String>,
    pub theme: ThemeMode,
    pub session: Option<String>,
}

/// Redact all but the last 4 characters of a secret
pub fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
#[derive(Debug, Clone, Copy)]
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

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print data as JSON, or the given lines on a terminal
    pub fn print_or<T: Serialize>(&self, data: T, lines: impl FnOnce(&T) -> Vec<String>) -> anyhow::Result<()> {
        if self.json {
            self.print(data)
        } else {
            for line in lines(&data) {
                println!("{}", line);
            }
            Ok(())
        }
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

    /// Print info message (suppressed in quiet mode and for JSON)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

//! IheNkiri - browse TMDB movies, TV shows and people from the terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! ihenkiri
//!
//! # CLI mode (for scripting)
//! ihenkiri movies --filter popular --pages 2
//! ihenkiri movie 550 --json
//! ihenkiri login
//! ```

use std::collections::HashMap;
use std::io::{stdout, Stdout};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ihenkiri::app::{Action, App, AppEvent, Tab};
use ihenkiri::cli::{Cli, Command, ExitCode, Output};
use ihenkiri::commands::{self, Context};
use ihenkiri::models::ListQuery;
use ihenkiri::repository::TmdbRepository;
use ihenkiri::screens::{MovieDetailScreen, PersonDetailScreen, TvShowDetailScreen};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Env var holding the log filter, e.g. `IHENKIRI_LOG=ihenkiri=debug`
const LOG_ENV: &str = "IHENKIRI_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.is_cli_mode() {
        init_cli_logging();
        let exit_code = run_cli(cli).await;
        std::process::exit(exit_code.into());
    } else {
        run_tui(cli).await
    }
}

// =============================================================================
// Logging
// =============================================================================

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn init_cli_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// The TUI owns the terminal, so logs go to `<cache_dir>/ihenkiri/ihenkiri.log`
fn init_tui_logging() -> Result<()> {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("ihenkiri")) else {
        return Ok(());
    };
    std::fs::create_dir_all(&dir)?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("ihenkiri.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// =============================================================================
// CLI Mode
// =============================================================================

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);
    let ctx = match Context::load(&cli) {
        Ok(ctx) => ctx,
        Err(e) => return output.error(format!("{:#}", e), ExitCode::Error),
    };

    match cli.command {
        Some(Command::Movies(cmd)) => commands::movies_cmd(cmd, &ctx, &output).await,
        Some(Command::Tv(cmd)) => commands::tv_cmd(cmd, &ctx, &output).await,
        Some(Command::People(cmd)) => commands::people_cmd(cmd, &ctx, &output).await,
        Some(Command::Movie(cmd)) => commands::movie_cmd(cmd, &ctx, &output).await,
        Some(Command::Show(cmd)) => commands::show_cmd(cmd, &ctx, &output).await,
        Some(Command::Person(cmd)) => commands::person_cmd(cmd, &ctx, &output).await,
        Some(Command::Login(cmd)) => commands::login_cmd(cmd, &ctx, &output).await,
        Some(Command::Guest) => commands::guest_cmd(&ctx, &output).await,
        Some(Command::Logout) => commands::logout_cmd(&ctx, &output).await,
        Some(Command::Theme(cmd)) => commands::theme_cmd(cmd, &ctx, &output).await,
        Some(Command::Settings) => commands::settings_cmd(&ctx, &output).await,
        // Handled by the is_cli_mode check
        None => ExitCode::Success,
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
async fn run_tui(cli: Cli) -> Result<()> {
    init_tui_logging()?;

    // Fail on a missing token before the terminal switches modes
    let ctx = Context::load(&cli)?;
    let repository = Arc::new(TmdbRepository::new(ctx.client()?));
    let mut app = App::with_repository(Arc::clone(&repository), ctx.query.clone(), ctx.settings());

    let mut terminal = init_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app, Tasks::new(repository, ctx.query)).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Spawns the work the app asks for and reports back over a channel
struct Tasks {
    repository: Arc<TmdbRepository>,
    query: ListQuery,
    tx: mpsc::UnboundedSender<AppEvent>,
    rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Page load in flight per tab
    pages: HashMap<Tab, JoinHandle<()>>,
}

impl Tasks {
    fn new(repository: Arc<TmdbRepository>, query: ListQuery) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            repository,
            query,
            tx,
            rx,
            pages: HashMap::new(),
        }
    }

    fn run_all(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.run(action);
        }
    }

    fn run(&mut self, action: Action) {
        let tx = self.tx.clone();
        match action {
            Action::LoadMovies(request) => {
                let handle = tokio::spawn(async move {
                    let _ = tx.send(AppEvent::MoviesPage(request.run().await));
                });
                self.track(Tab::Movies, handle);
            }
            Action::LoadTvShows(request) => {
                let handle = tokio::spawn(async move {
                    let _ = tx.send(AppEvent::TvShowsPage(request.run().await));
                });
                self.track(Tab::TvShows, handle);
            }
            Action::LoadPeople(request) => {
                let handle = tokio::spawn(async move {
                    let _ = tx.send(AppEvent::PeoplePage(request.run().await));
                });
                self.track(Tab::People, handle);
            }
            Action::CancelPages(tab) => {
                if let Some(handle) = self.pages.remove(&tab) {
                    debug!(?tab, "aborting page load");
                    handle.abort();
                }
            }
            Action::LoadMovieDetail(id) => {
                let repository = Arc::clone(&self.repository);
                let query = self.query.clone();
                tokio::spawn(async move {
                    let state = MovieDetailScreen::fetch(repository.as_ref(), &query, id).await;
                    let _ = tx.send(AppEvent::MovieDetail(id, state));
                });
            }
            Action::LoadTvShowDetail(id) => {
                let repository = Arc::clone(&self.repository);
                let query = self.query.clone();
                tokio::spawn(async move {
                    let state = TvShowDetailScreen::fetch(repository.as_ref(), &query, id).await;
                    let _ = tx.send(AppEvent::TvShowDetail(id, state));
                });
            }
            Action::LoadPersonDetail(id) => {
                let repository = Arc::clone(&self.repository);
                let query = self.query.clone();
                tokio::spawn(async move {
                    let state = PersonDetailScreen::fetch(repository.as_ref(), &query, id).await;
                    let _ = tx.send(AppEvent::PersonDetail(id, state));
                });
            }
        }
    }

    fn track(&mut self, tab: Tab, handle: JoinHandle<()>) {
        if let Some(previous) = self.pages.insert(tab, handle) {
            previous.abort();
        }
    }
}

/// Main event loop - handles input, applies finished tasks, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App, mut tasks: Tasks) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    info!("starting TUI");
    let actions = app.start();
    tasks.run_all(actions);

    while app.running {
        terminal.draw(|frame| ihenkiri::ui::render(frame, app))?;

        while let Ok(event) = tasks.rx.try_recv() {
            let actions = app.apply_event(event);
            tasks.run_all(actions);
        }

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    let actions = app.handle_key(key);
                    tasks.run_all(actions);
                }
            }
        }
    }

    for (_, handle) in tasks.pages.drain() {
        handle.abort();
    }
    Ok(())
}

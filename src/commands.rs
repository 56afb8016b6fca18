//! CLI Command Handlers
//!
//! Each handler drives the same screens the TUI uses, prints through
//! [`Output`] and returns an [`ExitCode`].

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::{AuthApi, TmdbClient};
use crate::cli::{
    redact, Cli, DetailCmd, ExitCode, ListOutput, LoginCmd, MoviesCmd, Output, PageArgs,
    PeopleCmd, SettingsOutput, StatusOk, ThemeCmd, TvCmd,
};
use crate::config::Config;
use crate::models::{FilterKind, ListQuery, MovieFilter, Session, TvShowFilter};
use crate::paging::Pager;
use crate::repository::TmdbRepository;
use crate::screens::{
    AuthScreen, DetailUiState, MovieDetailScreen, MoviesScreen, PeopleScreen, PersonDetailScreen,
    SettingsScreen, TvShowDetailScreen, TvShowsScreen,
};

// =============================================================================
// Context
// =============================================================================

/// Config and query settings resolved from the command line
#[derive(Debug, Clone)]
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub config: Config,
    pub query: ListQuery,
}

impl Context {
    /// Load the config (`--config` or the default path) and apply the
    /// `--language`/`--region` overrides to the query only.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config_path = cli.config.clone().or_else(Config::path);
        let config = match config_path {
            Some(ref path) => Config::load_from(path)?,
            None => Config::default(),
        };

        let language = cli
            .language
            .clone()
            .unwrap_or_else(|| config.language().to_string());
        let region = cli.region.clone().or_else(|| config.region.clone());

        Ok(Self {
            config_path,
            query: ListQuery::new(language, region),
            config,
        })
    }

    pub fn client(&self) -> anyhow::Result<Arc<TmdbClient>> {
        Ok(Arc::new(TmdbClient::new(self.config.api_token()?)))
    }

    pub fn settings(&self) -> SettingsScreen {
        SettingsScreen::new(self.config.clone(), self.config_path.clone())
    }
}

fn repository(ctx: &Context, output: &Output) -> Result<Arc<TmdbRepository>, ExitCode> {
    ctx.client()
        .map(|client| Arc::new(TmdbRepository::new(client)))
        .map_err(|e| output.error(e.to_string(), ExitCode::AuthFailed))
}

fn print<T: Serialize>(output: &Output, data: T, lines: impl FnOnce(&T) -> Vec<String>) -> ExitCode {
    match output.print_or(data, lines) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// List Commands
// =============================================================================

/// Load up to `pages` pages into `pager`. Returns the number of pages loaded.
async fn collect<T>(pager: &mut Pager<T>, pages: u32) -> Result<u32, (String, ExitCode)> {
    let mut loaded = 0;
    while loaded < pages {
        let Some(request) = pager.next_request() else {
            break;
        };
        let response = request.run().await;
        if let Err(ref e) = response.result {
            return Err((e.to_string(), ExitCode::from(e)));
        }
        pager.apply(response);
        loaded += 1;
    }
    Ok(loaded)
}

async fn list_cmd<T: Serialize + Clone + std::fmt::Display>(
    pager: &mut Pager<T>,
    category: &str,
    paging: PageArgs,
    output: &Output,
) -> ExitCode {
    output.info(format!("Fetching {}...", category));

    let pages_loaded = match collect(pager, paging.pages).await {
        Ok(n) => n,
        Err((msg, code)) => return output.error(format!("{} failed: {}", category, msg), code),
    };

    let limit = paging.limit.unwrap_or(usize::MAX);
    let results: Vec<T> = pager.items().iter().take(limit).cloned().collect();
    let data = ListOutput {
        category: category.to_string(),
        pages_loaded,
        end_reached: pager.end_reached(),
        results,
    };

    print(output, data, |data| {
        data.results
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{:>3}. {}", i + 1, item))
            .collect()
    })
}

pub async fn movies_cmd(cmd: MoviesCmd, ctx: &Context, output: &Output) -> ExitCode {
    let repository = match repository(ctx, output) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let filter = MovieFilter::from(cmd.filter);
    let mut screen = MoviesScreen::new(repository, ctx.query.clone());
    screen.on_filter_change(filter);
    list_cmd(screen.pager_mut(), filter.label(), cmd.paging, output).await
}

pub async fn tv_cmd(cmd: TvCmd, ctx: &Context, output: &Output) -> ExitCode {
    let repository = match repository(ctx, output) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let filter = TvShowFilter::from(cmd.filter);
    let mut screen = TvShowsScreen::new(repository, ctx.query.clone());
    screen.on_filter_change(filter);
    list_cmd(screen.pager_mut(), filter.label(), cmd.paging, output).await
}

pub async fn people_cmd(cmd: PeopleCmd, ctx: &Context, output: &Output) -> ExitCode {
    let repository = match repository(ctx, output) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let mut screen = PeopleScreen::new(repository, ctx.query.clone());
    list_cmd(screen.pager_mut(), "Popular People", cmd.paging, output).await
}

// =============================================================================
// Detail Commands
// =============================================================================

fn detail_result<T: Serialize>(
    state: DetailUiState<T>,
    output: &Output,
    lines: impl FnOnce(&T) -> Vec<String>,
) -> ExitCode {
    match state {
        DetailUiState::Success(data) => print(output, data, lines),
        DetailUiState::Error(msg) => output.error(msg, ExitCode::Error),
        DetailUiState::Loading => output.error("Details did not load", ExitCode::Error),
    }
}

pub async fn movie_cmd(cmd: DetailCmd, ctx: &Context, output: &Output) -> ExitCode {
    let repository = match repository(ctx, output) {
        Ok(r) => r,
        Err(code) => return code,
    };

    output.info(format!("Fetching movie {}...", cmd.id));
    let state = MovieDetailScreen::fetch(repository.as_ref(), &ctx.query, cmd.id).await;
    detail_result(state, output, |d| {
        let mut lines = vec![d.movie.to_string()];
        lines.extend(d.movie.tagline.clone());
        lines.push(String::new());
        lines.push(d.movie.overview.clone());
        let directors: Vec<_> = d.credits.directors().map(|c| c.name.as_str()).collect();
        if !directors.is_empty() {
            lines.push(format!("Director: {}", directors.join(", ")));
        }
        lines.extend(
            d.credits
                .cast
                .iter()
                .take(5)
                .map(|c| format!("  {} as {}", c.name, c.character)),
        );
        lines.extend(d.videos.iter().filter(|v| v.is_trailer()).find_map(|v| v.youtube_url()));
        lines
    })
}

pub async fn show_cmd(cmd: DetailCmd, ctx: &Context, output: &Output) -> ExitCode {
    let repository = match repository(ctx, output) {
        Ok(r) => r,
        Err(code) => return code,
    };

    output.info(format!("Fetching TV show {}...", cmd.id));
    let state = TvShowDetailScreen::fetch(repository.as_ref(), &ctx.query, cmd.id).await;
    detail_result(state, output, |d| {
        let mut lines = vec![d.show.to_string()];
        lines.extend(d.show.tagline.clone());
        lines.push(String::new());
        lines.push(d.show.overview.clone());
        lines.extend(d.show.seasons.iter().map(|s| format!("  {}", s)));
        lines
    })
}

pub async fn person_cmd(cmd: DetailCmd, ctx: &Context, output: &Output) -> ExitCode {
    let repository = match repository(ctx, output) {
        Ok(r) => r,
        Err(code) => return code,
    };

    output.info(format!("Fetching person {}...", cmd.id));
    let state = PersonDetailScreen::fetch(repository.as_ref(), &ctx.query, cmd.id).await;
    detail_result(state, output, |d| {
        let mut lines = vec![d.person.name.clone()];
        lines.extend(d.person.known_for_department.clone());
        lines.push(String::new());
        lines.push(d.person.biography.clone());
        lines.extend(
            d.credits
                .iter()
                .take(10)
                .map(|c| format!("  {} [{}]", c.title, c.media_type)),
        );
        lines
    })
}

// =============================================================================
// Account Commands
// =============================================================================

/// Session summary safe to print
#[derive(Debug, Serialize)]
pub struct SessionOutput {
    pub status: &'static str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl From<&Session> for SessionOutput {
    fn from(session: &Session) -> Self {
        match session {
            Session::User { account_id, .. } => Self {
                status: "ok",
                kind: "user",
                account_id: Some(account_id.clone()),
                expires_at: None,
            },
            Session::Guest { expires_at, .. } => Self {
                status: "ok",
                kind: "guest",
                account_id: None,
                expires_at: expires_at.clone(),
            },
        }
    }
}

fn auth_screen(ctx: &Context, output: &Output) -> Result<AuthScreen, ExitCode> {
    let client = ctx
        .client()
        .map_err(|e| output.error(e.to_string(), ExitCode::AuthFailed))?;
    let api: Arc<dyn AuthApi> = client;
    Ok(AuthScreen::new(api))
}

/// Persist the session the auth screen produced
fn store_session(auth: &AuthScreen, ctx: &Context, output: &Output) -> ExitCode {
    let state = auth.ui_state();
    if let Some(ref error) = state.error {
        return output.error(error.clone(), ExitCode::AuthFailed);
    }
    let Some(session) = state.session.clone() else {
        return output.error("No session was created", ExitCode::AuthFailed);
    };

    let mut settings = ctx.settings();
    if let Err(e) = settings.store_session(session.clone()) {
        return output.error(format!("Could not save session: {}", e), ExitCode::Error);
    }
    print(output, SessionOutput::from(&session), |_| vec![session.to_string()])
}

pub async fn login_cmd(cmd: LoginCmd, ctx: &Context, output: &Output) -> ExitCode {
    let mut auth = match auth_screen(ctx, output) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Some(redirect_to) = cmd.redirect_to {
        auth = auth.with_redirect(redirect_to);
    }

    auth.create_request_token().await;
    if let Some(ref error) = auth.ui_state().error {
        return output.error(error.clone(), ExitCode::AuthFailed);
    }
    let Some(url) = auth.ui_state().approval_url.clone() else {
        return output.error("No request token was created", ExitCode::AuthFailed);
    };

    // The URL has to reach the user even with --json/--quiet
    eprintln!("Approve access in your browser:\n\n  {}\n", url);
    eprintln!("Press Enter once approved...");
    let mut line = String::new();
    if let Err(e) = BufReader::new(tokio::io::stdin()).read_line(&mut line).await {
        return output.error(format!("Could not read stdin: {}", e), ExitCode::Error);
    }

    auth.create_session_id().await;
    store_session(&auth, ctx, output)
}

pub async fn guest_cmd(ctx: &Context, output: &Output) -> ExitCode {
    let mut auth = match auth_screen(ctx, output) {
        Ok(a) => a,
        Err(code) => return code,
    };

    auth.create_guest_session().await;
    store_session(&auth, ctx, output)
}

pub async fn logout_cmd(ctx: &Context, output: &Output) -> ExitCode {
    let mut settings = ctx.settings();
    let Some(session) = settings.login_state().cloned() else {
        output.info("Not logged in");
        return ExitCode::Success;
    };

    let mut auth = match auth_screen(ctx, output) {
        Ok(a) => a,
        Err(code) => return code,
    };
    auth.logout(&session).await;
    if let Some(ref error) = auth.ui_state().error {
        return output.error(error.clone(), ExitCode::AuthFailed);
    }

    if let Err(e) = settings.logout() {
        return output.error(format!("Could not save config: {}", e), ExitCode::Error);
    }
    print(output, StatusOk::default(), |_| vec!["Logged out".to_string()])
}

// =============================================================================
// Settings Commands
// =============================================================================

pub async fn theme_cmd(cmd: ThemeCmd, ctx: &Context, output: &Output) -> ExitCode {
    let mut settings = ctx.settings();
    if let Some(mode) = cmd.mode {
        if let Err(e) = settings.set_theme(mode.into()) {
            return output.error(format!("Could not save theme: {}", e), ExitCode::Error);
        }
    }

    let theme = settings.theme();
    print(output, theme, |t| vec![t.to_string()])
}

pub async fn settings_cmd(ctx: &Context, output: &Output) -> ExitCode {
    let settings = ctx.settings();
    let config = settings.config();

    let data = SettingsOutput {
        config_path: ctx.config_path.as_ref().map(|p| p.display().to_string()),
        api_token: config.api_token().ok().map(|t| redact(&t)),
        language: ctx.query.language.clone(),
        region: ctx.query.region.clone(),
        theme: settings.theme(),
        session: settings.login_state().map(|s| s.to_string()),
    };

    print(output, data, |s| {
        vec![
            format!(
                "config:   {}",
                s.config_path.as_deref().unwrap_or("(none)")
            ),
            format!("token:    {}", s.api_token.as_deref().unwrap_or("(not set)")),
            format!("language: {}", s.language),
            format!("region:   {}", s.region.as_deref().unwrap_or("(none)")),
            format!("theme:    {}", s.theme),
            format!(
                "session:  {}",
                s.session.as_deref().unwrap_or("Not logged in")
            ),
        ]
    })
}

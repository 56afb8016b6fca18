//! Terminal UI tests
//!
//! Drives an [`App`] over the fake repository, running the actions it emits
//! inline, and renders it into ratatui's `TestBackend`.

mod common;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use std::sync::Arc;

use common::FakeRepository;
use ihenkiri::app::{Action, AppEvent, Tab};
use ihenkiri::config::Config;
use ihenkiri::models::{ListQuery, Session};
use ihenkiri::screens::{
    MovieDetailScreen, PersonDetailScreen, SettingsScreen, TvShowDetailScreen,
};
use ihenkiri::ui::theme::{color_to_rgb, contrast_ratio, Theme};
use ihenkiri::{App, AppState, ThemeMode};

fn app_with(repo: Arc<FakeRepository>, config: Config) -> App {
    App::with_repository(
        repo,
        ListQuery::new("en-US", None),
        SettingsScreen::detached(config),
    )
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Run `actions` and everything they lead to
async fn drive(app: &mut App, repo: &FakeRepository, mut actions: Vec<Action>) {
    let query = ListQuery::new("en-US", None);
    while let Some(action) = actions.pop() {
        let event = match action {
            Action::LoadMovies(request) => AppEvent::MoviesPage(request.run().await),
            Action::LoadTvShows(request) => AppEvent::TvShowsPage(request.run().await),
            Action::LoadPeople(request) => AppEvent::PeoplePage(request.run().await),
            Action::CancelPages(_) => continue,
            Action::LoadMovieDetail(id) => {
                AppEvent::MovieDetail(id, MovieDetailScreen::fetch(repo, &query, id).await)
            }
            Action::LoadTvShowDetail(id) => {
                AppEvent::TvShowDetail(id, TvShowDetailScreen::fetch(repo, &query, id).await)
            }
            Action::LoadPersonDetail(id) => {
                AppEvent::PersonDetail(id, PersonDetailScreen::fetch(repo, &query, id).await)
            }
        };
        actions.extend(app.apply_event(event));
    }
}

async fn press(app: &mut App, repo: &FakeRepository, code: KeyCode) {
    let actions = app.handle_key(key(code));
    drive(app, repo, actions).await;
}

/// Render and flatten the buffer to one string per row
fn render(app: &App, width: u16, height: u16) -> Vec<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ihenkiri::ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect()
}

fn screen_contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

// =============================================================================
// Browser
// =============================================================================

#[tokio::test]
async fn test_initial_render_shows_tabs_chips_and_list() {
    let repo = Arc::new(FakeRepository::default());
    let mut app = app_with(repo.clone(), Config::default());

    let actions = app.start();
    drive(&mut app, &repo, actions).await;

    let rows = render(&app, 100, 30);
    assert!(screen_contains(&rows, "Movies"));
    assert!(screen_contains(&rows, "TV Shows"));
    assert!(screen_contains(&rows, "Now Playing"));
    assert!(screen_contains(&rows, "The Shawshank Redemption"));
    assert!(screen_contains(&rows, "Parasite"));
    assert!(screen_contains(&rows, "End of list"));
    assert!(screen_contains(&rows, "Not logged in"));
}

#[tokio::test]
async fn test_renders_at_small_and_large_sizes() {
    let repo = Arc::new(FakeRepository::default());
    let mut app = app_with(repo.clone(), Config::default());
    let actions = app.start();
    drive(&mut app, &repo, actions).await;

    for (w, h) in [(80, 24), (200, 50), (40, 10)] {
        let rows = render(&app, w, h);
        assert_eq!(rows.len(), h as usize);
    }
}

#[tokio::test]
async fn test_empty_list_shows_loading_before_first_page() {
    let repo = Arc::new(FakeRepository::default());
    let mut app = app_with(repo, Config::default());

    // Request handed out but never completed
    let _pending = app.start();

    let rows = render(&app, 80, 24);
    assert!(screen_contains(&rows, "Loading"));
}

#[tokio::test]
async fn test_filter_change_reloads_from_new_endpoint() {
    let repo = Arc::new(FakeRepository::default());
    let mut app = app_with(repo.clone(), Config::default());
    let actions = app.start();
    drive(&mut app, &repo, actions).await;

    let actions = app.handle_key(key(KeyCode::Right));
    assert!(matches!(actions[0], Action::CancelPages(Tab::Movies)));
    drive(&mut app, &repo, actions).await;

    assert_eq!(
        repo.calls(),
        vec!["movie/now_playing:1", "movie/popular:1"]
    );
    assert_eq!(app.list().selected, 0);
    assert_eq!(app.movie_pager().len(), 7);
}

#[tokio::test]
async fn test_tab_switch_loads_lazily() {
    let repo = Arc::new(FakeRepository::default());
    let mut app = app_with(repo.clone(), Config::default());
    let actions = app.start();
    drive(&mut app, &repo, actions).await;

    press(&mut app, &repo, KeyCode::Tab).await;
    assert_eq!(app.tab, Tab::TvShows);
    let rows = render(&app, 100, 30);
    assert!(screen_contains(&rows, "Airing Today"));
    assert!(screen_contains(&rows, "Show 1"));

    press(&mut app, &repo, KeyCode::Tab).await;
    assert_eq!(app.tab, Tab::People);
    let rows = render(&app, 100, 30);
    assert!(screen_contains(&rows, "Person 4"));

    assert_eq!(
        repo.calls(),
        vec!["movie/now_playing:1", "tv/airing_today:1", "person/popular:1"]
    );
}

#[tokio::test]
async fn test_scrolling_to_end_appends_next_page() {
    let repo = Arc::new(FakeRepository::with_pages(2));
    let mut app = app_with(repo.clone(), Config::default());
    let actions = app.start();
    drive(&mut app, &repo, actions).await;
    assert_eq!(app.movie_pager().len(), 7);

    press(&mut app, &repo, KeyCode::Down).await;
    press(&mut app, &repo, KeyCode::Down).await;

    assert_eq!(app.movie_pager().len(), 14);
    assert!(app.movie_pager().end_reached());
    assert_eq!(app.list().selected, 2);
}

// =============================================================================
// Detail pane
// =============================================================================

#[tokio::test]
async fn test_enter_opens_movie_detail() {
    let repo = Arc::new(FakeRepository::default());
    let mut app = app_with(repo.clone(), Config::default());
    let actions = app.start();
    drive(&mut app, &repo, actions).await;

    let actions = app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.state, AppState::Detail);
    assert!(screen_contains(&render(&app, 100, 30), "Loading"));

    drive(&mut app, &repo, actions).await;
    let rows = render(&app, 100, 40);
    assert!(screen_contains(&rows, "Fight Club"));
    assert!(screen_contains(&rows, "Mischief. Mayhem. Soap."));
    assert!(screen_contains(&rows, "Drama"));
    assert!(screen_contains(&rows, "https://image.tmdb.org/t/p/w500/"));
    assert!(screen_contains(&rows, "esc:back"));

    press(&mut app, &repo, KeyCode::Esc).await;
    assert_eq!(app.state, AppState::Browse);
}

#[tokio::test]
async fn test_detail_error_can_be_retried() {
    let repo = Arc::new(FakeRepository {
        fail_details: true,
        ..FakeRepository::default()
    });
    let mut app = app_with(repo.clone(), Config::default());
    let actions = app.start();
    drive(&mut app, &repo, actions).await;

    press(&mut app, &repo, KeyCode::Enter).await;
    let rows = render(&app, 100, 30);
    assert!(screen_contains(&rows, "Error loading movie details"));

    let actions = app.handle_key(key(KeyCode::Char('r')));
    assert!(matches!(actions[..], [Action::LoadMovieDetail(1)]));
}

// =============================================================================
// Theme and status bar
// =============================================================================

#[tokio::test]
async fn test_status_bar_shows_session_and_theme() {
    let repo = Arc::new(FakeRepository::default());
    let config = Config {
        theme: ThemeMode::Light,
        session: Some(Session::Guest {
            guest_session_id: "g".into(),
            expires_at: None,
        }),
        ..Config::default()
    };
    let app = app_with(repo, config);

    let rows = render(&app, 100, 20);
    assert!(screen_contains(&rows, "Guest"));
    assert!(screen_contains(&rows, "theme:light"));
}

#[test]
fn test_theme_key_cycles_palette() {
    let repo = Arc::new(FakeRepository::default());
    let mut app = app_with(repo, Config::default());
    assert_eq!(app.theme.mode(), ThemeMode::System);

    app.handle_key(key(KeyCode::Char('t')));
    assert_eq!(app.theme.mode(), ThemeMode::Dark);
    app.handle_key(key(KeyCode::Char('t')));
    assert_eq!(app.theme.mode(), ThemeMode::Light);
    assert_eq!(app.theme, Theme::for_mode(ThemeMode::Light));
}

#[test]
fn test_palettes_keep_text_readable() {
    for mode in [ThemeMode::Dark, ThemeMode::Light] {
        let palette = Theme::for_mode(mode).palette;
        let text = color_to_rgb(palette.text).unwrap();
        let background = color_to_rgb(palette.background).unwrap();
        let ratio = contrast_ratio(text, background);
        assert!(ratio >= 4.5, "{:?} text contrast {:.2}", mode, ratio);
    }
}

#[test]
fn test_quit_keys() {
    let repo = Arc::new(FakeRepository::default());
    let mut app = app_with(repo.clone(), Config::default());
    app.handle_key(key(KeyCode::Char('q')));
    assert!(!app.running);

    let mut app = app_with(repo, Config::default());
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(!app.running);
}

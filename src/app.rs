//! App state and core application logic
//!
//! Owns the three list screens, the detail pane and the settings. Key
//! handling never does I/O: it mutates state and returns the [`Action`]s the
//! event loop should run. Results come back as [`AppEvent`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

use crate::models::{ListQuery, Movie, Person, TvShow};
use crate::paging::{PageRequest, PageResponse, Pager};
use crate::repository::{MovieRepository, PersonRepository, TvShowRepository};
use crate::screens::{
    DetailUiState, MovieDetails, MoviesScreen, PeopleScreen, PersonDetails, SettingsScreen,
    TvShowDetails, TvShowsScreen,
};
use crate::ui::Theme;

// =============================================================================
// Tabs and Screens
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Movies,
    TvShows,
    People,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Movies, Tab::TvShows, Tab::People];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Movies => "Movies",
            Tab::TvShows => "TV Shows",
            Tab::People => "People",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Movies => Tab::TvShows,
            Tab::TvShows => Tab::People,
            Tab::People => Tab::Movies,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Movies => 0,
            Tab::TvShows => 1,
            Tab::People => 2,
        }
    }
}

/// Which pane has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Browse,
    Detail,
}

/// Detail pane contents
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Movie {
        id: u64,
        state: DetailUiState<MovieDetails>,
    },
    TvShow {
        id: u64,
        state: DetailUiState<TvShowDetails>,
    },
    Person {
        id: u64,
        state: DetailUiState<PersonDetails>,
    },
}

impl DetailView {
    fn request(&self) -> Action {
        match *self {
            DetailView::Movie { id, .. } => Action::LoadMovieDetail(id),
            DetailView::TvShow { id, .. } => Action::LoadTvShowDetail(id),
            DetailView::Person { id, .. } => Action::LoadPersonDetail(id),
        }
    }

    fn is_error(&self) -> bool {
        match self {
            DetailView::Movie { state, .. } => state.error().is_some(),
            DetailView::TvShow { state, .. } => state.error().is_some(),
            DetailView::Person { state, .. } => state.error().is_some(),
        }
    }
}

// =============================================================================
// Actions and Events
// =============================================================================

/// Work the event loop should start
#[derive(Debug)]
pub enum Action {
    LoadMovies(PageRequest<Movie>),
    LoadTvShows(PageRequest<TvShow>),
    LoadPeople(PageRequest<Person>),
    /// Abort the page load in flight for a tab
    CancelPages(Tab),
    LoadMovieDetail(u64),
    LoadTvShowDetail(u64),
    LoadPersonDetail(u64),
}

/// Finished work coming back to the app
#[derive(Debug)]
pub enum AppEvent {
    MoviesPage(PageResponse<Movie>),
    TvShowsPage(PageResponse<TvShow>),
    PeoplePage(PageResponse<Person>),
    MovieDetail(u64, DetailUiState<MovieDetails>),
    TvShowDetail(u64, DetailUiState<TvShowDetails>),
    PersonDetail(u64, DetailUiState<PersonDetails>),
}

// =============================================================================
// Selection State
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub selected: usize,
    pub len: usize,
}

impl ListState {
    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
    }

    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.len = 0;
    }

    /// Update length, clamping the selection
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// Main Application State
// =============================================================================

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub state: AppState,
    pub tab: Tab,
    pub movies: MoviesScreen,
    pub tv_shows: TvShowsScreen,
    pub people: PeopleScreen,
    /// Selection per tab, indexed by [`Tab::index`]
    pub lists: [ListState; 3],
    pub detail: Option<DetailView>,
    pub settings: SettingsScreen,
    pub theme: Theme,
    /// Transient message shown in the status bar
    pub error: Option<String>,
}

impl App {
    pub fn new(
        movies: MoviesScreen,
        tv_shows: TvShowsScreen,
        people: PeopleScreen,
        settings: SettingsScreen,
    ) -> Self {
        let theme = Theme::for_mode(settings.theme());
        Self {
            running: true,
            state: AppState::Browse,
            tab: Tab::Movies,
            movies,
            tv_shows,
            people,
            lists: Default::default(),
            detail: None,
            settings,
            theme,
            error: None,
        }
    }

    /// Build all screens over one repository
    pub fn with_repository<R>(repository: Arc<R>, query: ListQuery, settings: SettingsScreen) -> Self
    where
        R: MovieRepository + TvShowRepository + PersonRepository + 'static,
    {
        Self::new(
            MoviesScreen::new(repository.clone(), query.clone()),
            TvShowsScreen::new(repository.clone(), query.clone()),
            PeopleScreen::new(repository, query),
            settings,
        )
    }

    /// Initial load of the visible tab
    pub fn start(&mut self) -> Vec<Action> {
        self.load_more(self.tab).into_iter().collect()
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn list(&self) -> &ListState {
        &self.lists[self.tab.index()]
    }

    fn list_mut(&mut self) -> &mut ListState {
        &mut self.lists[self.tab.index()]
    }

    /// Prefetch check for the current selection of `tab`
    fn load_more(&mut self, tab: Tab) -> Option<Action> {
        let index = self.lists[tab.index()].selected;
        match tab {
            Tab::Movies => self.movies.pager_mut().access(index).map(Action::LoadMovies),
            Tab::TvShows => self.tv_shows.pager_mut().access(index).map(Action::LoadTvShows),
            Tab::People => self.people.pager_mut().access(index).map(Action::LoadPeople),
        }
    }

    fn retry(&mut self, tab: Tab) -> Option<Action> {
        match tab {
            Tab::Movies => self.movies.pager_mut().retry().map(Action::LoadMovies),
            Tab::TvShows => self.tv_shows.pager_mut().retry().map(Action::LoadTvShows),
            Tab::People => self.people.pager_mut().retry().map(Action::LoadPeople),
        }
    }

    fn change_filter(&mut self, offset: isize) -> Vec<Action> {
        match self.tab {
            Tab::Movies => {
                let kind = self.movies.filter_state().neighbour(offset);
                self.movies.on_filter_change(kind);
            }
            Tab::TvShows => {
                let kind = self.tv_shows.filter_state().neighbour(offset);
                self.tv_shows.on_filter_change(kind);
            }
            Tab::People => return Vec::new(),
        }
        self.list_mut().reset();

        let mut actions = vec![Action::CancelPages(self.tab)];
        actions.extend(self.load_more(self.tab));
        actions
    }

    fn open_detail(&mut self) -> Option<Action> {
        let index = self.list().selected;
        let view = match self.tab {
            Tab::Movies => self.movies.pager().get(index).map(|m| DetailView::Movie {
                id: m.id,
                state: DetailUiState::Loading,
            }),
            Tab::TvShows => self.tv_shows.pager().get(index).map(|s| DetailView::TvShow {
                id: s.id,
                state: DetailUiState::Loading,
            }),
            Tab::People => self.people.pager().get(index).map(|p| DetailView::Person {
                id: p.id,
                state: DetailUiState::Loading,
            }),
        }?;

        let action = view.request();
        self.detail = Some(view);
        self.state = AppState::Detail;
        Some(action)
    }

    fn cycle_theme(&mut self) {
        match self.settings.cycle_theme() {
            Ok(mode) => self.theme = Theme::for_mode(mode),
            Err(e) => {
                tracing::warn!(error = %e, "could not save theme");
                self.theme = Theme::for_mode(self.settings.theme());
                self.error = Some(format!("Could not save theme: {}", e));
            }
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle a key press, returning the work it started
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        self.error = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return Vec::new();
        }

        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                Vec::new()
            }
            KeyCode::Char('t') => {
                self.cycle_theme();
                Vec::new()
            }
            _ => match self.state {
                AppState::Browse => self.handle_browse_key(key),
                AppState::Detail => self.handle_detail_key(key),
            },
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Vec<Action> {
        let tab = self.tab;
        let action = match key.code {
            KeyCode::Tab => {
                self.tab = self.tab.next();
                self.load_more(self.tab)
            }
            KeyCode::Left | KeyCode::Char('h') => return self.change_filter(-1),
            KeyCode::Right | KeyCode::Char('l') => return self.change_filter(1),
            KeyCode::Up | KeyCode::Char('k') => {
                self.list_mut().up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.list_mut().down();
                self.load_more(tab)
            }
            KeyCode::PageUp => {
                self.list_mut().page_up(10);
                None
            }
            KeyCode::PageDown => {
                self.list_mut().page_down(10);
                self.load_more(tab)
            }
            KeyCode::Home => {
                self.list_mut().first();
                None
            }
            KeyCode::End => {
                self.list_mut().last();
                self.load_more(tab)
            }
            KeyCode::Enter => self.open_detail(),
            KeyCode::Char('r') => self.retry(tab),
            _ => None,
        };
        action.into_iter().collect()
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Vec<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => {
                self.state = AppState::Browse;
                self.detail = None;
                Vec::new()
            }
            KeyCode::Char('r') => match self.detail {
                Some(ref view) if view.is_error() => {
                    let action = view.request();
                    self.reset_detail();
                    vec![action]
                }
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn reset_detail(&mut self) {
        if let Some(view) = self.detail.as_mut() {
            match view {
                DetailView::Movie { state, .. } => *state = DetailUiState::Loading,
                DetailView::TvShow { state, .. } => *state = DetailUiState::Loading,
                DetailView::Person { state, .. } => *state = DetailUiState::Loading,
            }
        }
    }

    // -------------------------------------------------------------------------
    // Async Results
    // -------------------------------------------------------------------------

    /// Fold a finished task into the state; may start follow-up loads
    pub fn apply_event(&mut self, event: AppEvent) -> Vec<Action> {
        match event {
            AppEvent::MoviesPage(response) => {
                let applied = self.movies.pager_mut().apply(response);
                self.after_page(Tab::Movies, applied)
            }
            AppEvent::TvShowsPage(response) => {
                let applied = self.tv_shows.pager_mut().apply(response);
                self.after_page(Tab::TvShows, applied)
            }
            AppEvent::PeoplePage(response) => {
                let applied = self.people.pager_mut().apply(response);
                self.after_page(Tab::People, applied)
            }
            AppEvent::MovieDetail(loaded, result) => {
                if let Some(DetailView::Movie { id, state }) = self.detail.as_mut() {
                    if *id == loaded {
                        *state = result;
                    }
                }
                Vec::new()
            }
            AppEvent::TvShowDetail(loaded, result) => {
                if let Some(DetailView::TvShow { id, state }) = self.detail.as_mut() {
                    if *id == loaded {
                        *state = result;
                    }
                }
                Vec::new()
            }
            AppEvent::PersonDetail(loaded, result) => {
                if let Some(DetailView::Person { id, state }) = self.detail.as_mut() {
                    if *id == loaded {
                        *state = result;
                    }
                }
                Vec::new()
            }
        }
    }

    fn after_page(&mut self, tab: Tab, applied: bool) -> Vec<Action> {
        if !applied {
            return Vec::new();
        }
        let len = match tab {
            Tab::Movies => self.movies.pager().len(),
            Tab::TvShows => self.tv_shows.pager().len(),
            Tab::People => self.people.pager().len(),
        };
        self.lists[tab.index()].set_len(len);
        self.load_more(tab).into_iter().collect()
    }

    /// Pager of the movies tab, for rendering
    pub fn movie_pager(&self) -> &Pager<Movie> {
        self.movies.pager()
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Detail screens for movies, TV shows and people
//!
//! The main record decides success or failure. Secondary calls (credits,
//! videos, similar titles) degrade to empty collections when they fail.

use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::models::{
    Credits, ListQuery, Movie, MovieDetail, Outcome, PersonCredit, PersonDetail, TvShow,
    TvShowDetail, Video,
};
use crate::repository::{MovieRepository, PersonRepository, TvShowRepository};

pub const MOVIE_DETAILS_ERROR: &str = "Error loading movie details, please try again";
pub const TV_SHOW_DETAILS_ERROR: &str = "Error loading TV show details, please try again";
pub const PERSON_DETAILS_ERROR: &str = "Error loading person details, please try again";

/// UI state of a detail screen
#[derive(Debug, Clone, PartialEq)]
pub enum DetailUiState<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> DetailUiState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, DetailUiState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            DetailUiState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DetailUiState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetails {
    pub movie: MovieDetail,
    pub credits: Credits,
    pub videos: Vec<Video>,
    pub similar: Vec<Movie>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TvShowDetails {
    pub show: TvShowDetail,
    pub credits: Credits,
    pub videos: Vec<Video>,
    pub similar: Vec<TvShow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonDetails {
    pub person: PersonDetail,
    pub credits: Vec<PersonCredit>,
}

fn or_empty<T: Default>(outcome: Outcome<T>, what: &str, id: u64) -> T {
    match outcome {
        Outcome::Success(data) => data,
        Outcome::Failure(msg) => {
            warn!(id, error = %msg, "{} unavailable", what);
            T::default()
        }
    }
}

// =============================================================================
// Movie
// =============================================================================

#[derive(Debug)]
pub struct MovieDetailScreen {
    repository: Arc<dyn MovieRepository>,
    query: ListQuery,
    state: DetailUiState<MovieDetails>,
}

impl MovieDetailScreen {
    pub fn new(repository: Arc<dyn MovieRepository>, query: ListQuery) -> Self {
        Self {
            repository,
            query,
            state: DetailUiState::Loading,
        }
    }

    pub async fn load(&mut self, id: u64) {
        self.state = DetailUiState::Loading;
        self.state = Self::fetch(self.repository.as_ref(), &self.query, id).await;
    }

    /// Load everything the screen shows for movie `id`
    pub async fn fetch(
        repository: &dyn MovieRepository,
        query: &ListQuery,
        id: u64,
    ) -> DetailUiState<MovieDetails> {
        let language = query.language.as_str();
        let similar_query = query.with_page(1);
        let (details, credits, videos, similar) = tokio::join!(
            repository.details(id, language),
            repository.credits(id, language),
            repository.videos(id, language),
            repository.similar(id, &similar_query),
        );

        match details {
            Outcome::Success(movie) => DetailUiState::Success(MovieDetails {
                movie,
                credits: or_empty(credits, "credits", id),
                videos: or_empty(videos, "videos", id),
                similar: or_empty(similar.map(|p| p.items), "similar movies", id),
            }),
            Outcome::Failure(msg) => {
                warn!(id, error = %msg, "movie details failed");
                DetailUiState::Error(MOVIE_DETAILS_ERROR.to_string())
            }
        }
    }

    pub fn ui_state(&self) -> &DetailUiState<MovieDetails> {
        &self.state
    }
}

// =============================================================================
// TV Show
// =============================================================================

#[derive(Debug)]
pub struct TvShowDetailScreen {
    repository: Arc<dyn TvShowRepository>,
    query: ListQuery,
    state: DetailUiState<TvShowDetails>,
}

impl TvShowDetailScreen {
    pub fn new(repository: Arc<dyn TvShowRepository>, query: ListQuery) -> Self {
        Self {
            repository,
            query,
            state: DetailUiState::Loading,
        }
    }

    pub async fn load(&mut self, id: u64) {
        self.state = DetailUiState::Loading;
        self.state = Self::fetch(self.repository.as_ref(), &self.query, id).await;
    }

    pub async fn fetch(
        repository: &dyn TvShowRepository,
        query: &ListQuery,
        id: u64,
    ) -> DetailUiState<TvShowDetails> {
        let language = query.language.as_str();
        let similar_query = query.with_page(1);
        let (details, credits, videos, similar) = tokio::join!(
            repository.details(id, language),
            repository.credits(id, language),
            repository.videos(id, language),
            repository.similar(id, &similar_query),
        );

        match details {
            Outcome::Success(show) => DetailUiState::Success(TvShowDetails {
                show,
                credits: or_empty(credits, "credits", id),
                videos: or_empty(videos, "videos", id),
                similar: or_empty(similar.map(|p| p.items), "similar shows", id),
            }),
            Outcome::Failure(msg) => {
                warn!(id, error = %msg, "tv show details failed");
                DetailUiState::Error(TV_SHOW_DETAILS_ERROR.to_string())
            }
        }
    }

    pub fn ui_state(&self) -> &DetailUiState<TvShowDetails> {
        &self.state
    }
}

// =============================================================================
// Person
// =============================================================================

#[derive(Debug)]
pub struct PersonDetailScreen {
    repository: Arc<dyn PersonRepository>,
    query: ListQuery,
    state: DetailUiState<PersonDetails>,
}

impl PersonDetailScreen {
    pub fn new(repository: Arc<dyn PersonRepository>, query: ListQuery) -> Self {
        Self {
            repository,
            query,
            state: DetailUiState::Loading,
        }
    }

    pub async fn load(&mut self, id: u64) {
        self.state = DetailUiState::Loading;
        self.state = Self::fetch(self.repository.as_ref(), &self.query, id).await;
    }

    pub async fn fetch(
        repository: &dyn PersonRepository,
        query: &ListQuery,
        id: u64,
    ) -> DetailUiState<PersonDetails> {
        let language = query.language.as_str();
        let (details, credits) = tokio::join!(
            repository.details(id, language),
            repository.combined_credits(id, language),
        );

        match details {
            Outcome::Success(person) => DetailUiState::Success(PersonDetails {
                person,
                credits: or_empty(credits, "credits", id),
            }),
            Outcome::Failure(msg) => {
                warn!(id, error = %msg, "person details failed");
                DetailUiState::Error(PERSON_DETAILS_ERROR.to_string())
            }
        }
    }

    pub fn ui_state(&self) -> &DetailUiState<PersonDetails> {
        &self.state
    }
}

//! Screen state holders
//!
//! Each screen owns its state outright; the terminal UI and the CLI read it
//! and forward user events to it.

pub mod auth;
pub mod detail;
pub mod filters;
pub mod movies;
pub mod people;
pub mod settings;
pub mod tv_shows;

pub use auth::{AuthScreen, AuthUiState};
pub use detail::{
    DetailUiState, MovieDetailScreen, MovieDetails, PersonDetailScreen, PersonDetails,
    TvShowDetailScreen, TvShowDetails,
};
pub use filters::FilterState;
pub use movies::MoviesScreen;
pub use people::PeopleScreen;
pub use settings::SettingsScreen;
pub use tv_shows::TvShowsScreen;

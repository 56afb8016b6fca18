//! IheNkiri - browse TMDB movies, TV shows and people from the terminal
//!
//! The core is a filtered, paginated list flow: a filter chip selection picks
//! a TMDB endpoint, a [`paging::Pager`] fetches it page by page, and stale
//! pages from a previous selection are dropped.
//!
//! # Modules
//!
//! - `models` - Domain types, filters and `Outcome`
//! - `api` - TMDB REST client, DTOs and auth endpoints
//! - `repository` - Repositories mapping DTOs to models
//! - `paging` - Generation-tagged pager
//! - `screens` - Screen state holders (lists, details, auth, settings)
//! - `images` - TMDB image URL builder
//! - `config` - Config file, API token lookup
//! - `app` / `ui` - Terminal browser
//! - `cli` / `commands` - Scriptable CLI

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod images;
pub mod models;
pub mod paging;
pub mod repository;
pub mod screens;
pub mod ui;

// Re-export commonly used types
pub use models::{
    FilterKind, FilterOption, ListQuery, MediaType, Movie, MovieFilter, Outcome, Page, Person,
    Session, TvShow, TvShowFilter,
};

pub use api::{TmdbClient, TmdbError};
pub use app::{App, AppState};
pub use config::{Config, ThemeMode};
pub use images::{build_image_url, ImageSize};
pub use paging::{LoadState, LoadStates, Pager, PagingSource};
pub use repository::{MovieRepository, PersonRepository, TmdbRepository, TvShowRepository};

//! Data structures and types for IheNkiri
//!
//! Contains the domain models shared across the application, organized by area:
//! - **Lists**: movies, TV shows and people as they appear in paged lists
//! - **Paging**: the query sent for a page and the page that comes back
//! - **Filters**: the filter chips of the movie and TV show screens
//! - **Details**: full records with credits, videos and filmographies
//! - **Session**: login state produced by the auth flow

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::TmdbError;

// =============================================================================
// List Models
// =============================================================================

/// Media type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Tv => write!(f, "TV Show"),
        }
    }
}

/// A movie as listed by TMDB list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub original_title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f32,
    pub vote_count: u32,
    pub popularity: f32,
    pub genre_ids: Vec<u32>,
}

impl Movie {
    pub fn year(&self) -> Option<u16> {
        self.release_date.as_deref().and_then(extract_year)
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} ★ {:.1}", self.title, year_str, self.vote_average)
    }
}

/// A TV show as listed by TMDB list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShow {
    pub id: u64,
    pub name: String,
    pub original_name: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: f32,
    pub vote_count: u32,
    pub popularity: f32,
    pub genre_ids: Vec<u32>,
    pub origin_country: Vec<String>,
}

impl TvShow {
    pub fn year(&self) -> Option<u16> {
        self.first_air_date.as_deref().and_then(extract_year)
    }
}

impl fmt::Display for TvShow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} ★ {:.1}", self.name, year_str, self.vote_average)
    }
}

/// A person as listed by `/person/popular`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub known_for_department: Option<String>,
    pub profile_path: Option<String>,
    pub popularity: f32,
    /// Titles of the movies/shows the person is best known for
    pub known_for: Vec<String>,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.known_for_department {
            Some(dept) => write!(f, "{} [{}]", self.name, dept),
            None => write!(f, "{}", self.name),
        }
    }
}

// =============================================================================
// Paging Models
// =============================================================================

/// Default TMDB response language
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Query object for list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// 1-based page number
    pub page: u32,
    /// Locale string, e.g. `en-US`
    pub language: String,
    /// Optional ISO 3166-1 region code
    pub region: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            language: DEFAULT_LANGUAGE.to_string(),
            region: None,
        }
    }
}

impl ListQuery {
    pub fn new(language: impl Into<String>, region: Option<String>) -> Self {
        Self {
            page: 1,
            language: language.into(),
            region,
        }
    }

    /// Same language/region, different page
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

/// One page of results from a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub items: Vec<T>,
    pub total_pages: u32,
    pub total_results: u32,
}

impl<T> Page<T> {
    /// Key of the page after this one, if any
    pub fn next_page(&self) -> Option<u32> {
        if self.page < self.total_pages {
            Some(self.page + 1)
        } else {
            None
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            items: self.items.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

// =============================================================================
// Filter Models
// =============================================================================

/// A kind of filter shown as a chip above a list
pub trait FilterKind: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every kind, in chip order. The first one is the default.
    fn all() -> &'static [Self];

    /// Human-readable chip label
    fn label(&self) -> &'static str;
}

/// Filters for the movies screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieFilter {
    NowPlaying,
    Popular,
    TopRated,
    Upcoming,
    Discover,
}

impl FilterKind for MovieFilter {
    fn all() -> &'static [Self] {
        &[
            MovieFilter::NowPlaying,
            MovieFilter::Popular,
            MovieFilter::TopRated,
            MovieFilter::Upcoming,
            MovieFilter::Discover,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            MovieFilter::NowPlaying => "Now Playing",
            MovieFilter::Popular => "Popular",
            MovieFilter::TopRated => "Top Rated",
            MovieFilter::Upcoming => "Upcoming",
            MovieFilter::Discover => "Discover",
        }
    }
}

/// Filters for the TV shows screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TvShowFilter {
    AiringToday,
    OnTheAir,
    Popular,
    TopRated,
    Discover,
}

impl FilterKind for TvShowFilter {
    fn all() -> &'static [Self] {
        &[
            TvShowFilter::AiringToday,
            TvShowFilter::OnTheAir,
            TvShowFilter::Popular,
            TvShowFilter::TopRated,
            TvShowFilter::Discover,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            TvShowFilter::AiringToday => "Airing Today",
            TvShowFilter::OnTheAir => "On The Air",
            TvShowFilter::Popular => "Popular",
            TvShowFilter::TopRated => "Top Rated",
            TvShowFilter::Discover => "Discover",
        }
    }
}

/// One selectable filter chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption<K> {
    pub kind: K,
    pub selected: bool,
}

impl<K: FilterKind> FilterOption<K> {
    /// Full option set with only `active` selected
    pub fn set_for(active: K) -> Vec<Self> {
        K::all()
            .iter()
            .map(|&kind| FilterOption {
                kind,
                selected: kind == active,
            })
            .collect()
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// Success/failure wrapper used by detail flows
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(data) => Some(data),
            Outcome::Failure(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(data) => Outcome::Success(f(data)),
            Outcome::Failure(msg) => Outcome::Failure(msg),
        }
    }
}

impl<T> From<Result<T, TmdbError>> for Outcome<T> {
    fn from(result: Result<T, TmdbError>) -> Self {
        match result {
            Ok(data) => Outcome::Success(data),
            Err(e) => Outcome::Failure(e.to_string()),
        }
    }
}

// =============================================================================
// Detail Models
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Detailed movie information from TMDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub imdb_id: Option<String>,
    pub title: String,
    pub tagline: Option<String>,
    pub overview: String,
    /// Runtime in minutes
    pub runtime: Option<u32>,
    pub release_date: Option<String>,
    pub status: Option<String>,
    pub genres: Vec<Genre>,
    pub vote_average: f32,
    pub vote_count: u32,
    pub budget: u64,
    pub revenue: u64,
    pub homepage: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

impl fmt::Display for MovieDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self
            .release_date
            .as_deref()
            .and_then(extract_year)
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        match self.runtime {
            Some(runtime) => write!(
                f,
                "{}{} - {}h {}m - ★ {:.1}",
                self.title,
                year,
                runtime / 60,
                runtime % 60,
                self.vote_average
            ),
            None => write!(f, "{}{} - ★ {:.1}", self.title, year, self.vote_average),
        }
    }
}

/// Summary of a TV season (used in TvShowDetail)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub season_number: u16,
    pub episode_count: u16,
    pub name: Option<String>,
    pub air_date: Option<String>,
}

impl fmt::Display for SeasonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("Season");
        write!(f, "{} ({} episodes)", name, self.episode_count)
    }
}

/// Detailed TV show information from TMDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShowDetail {
    pub id: u64,
    pub name: String,
    pub tagline: Option<String>,
    pub overview: String,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    pub status: Option<String>,
    pub number_of_seasons: u16,
    pub number_of_episodes: u32,
    pub episode_run_time: Vec<u32>,
    pub genres: Vec<Genre>,
    pub networks: Vec<String>,
    pub seasons: Vec<SeasonSummary>,
    pub vote_average: f32,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

impl fmt::Display for TvShowDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self
            .first_air_date
            .as_deref()
            .and_then(extract_year)
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        write!(
            f,
            "{}{} - {} seasons - ★ {:.1}",
            self.name, year, self.number_of_seasons, self.vote_average
        )
    }
}

/// Detailed person information from TMDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDetail {
    pub id: u64,
    pub name: String,
    pub biography: String,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub place_of_birth: Option<String>,
    pub known_for_department: Option<String>,
    pub also_known_as: Vec<String>,
    pub popularity: f32,
    pub profile_path: Option<String>,
}

/// Cast entry of a credits response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: String,
    pub profile_path: Option<String>,
    pub order: u32,
}

/// Crew entry of a credits response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    pub job: String,
    pub department: String,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    /// Sorted by billing order
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

impl Credits {
    /// Crew members credited as director
    pub fn directors(&self) -> impl Iterator<Item = &CrewMember> {
        self.crew.iter().filter(|c| c.job == "Director")
    }
}

/// A video (trailer, teaser, clip...) attached to a title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String,
    pub video_type: String,
    pub official: bool,
}

impl Video {
    /// Watch URL for YouTube-hosted videos
    pub fn youtube_url(&self) -> Option<String> {
        if self.site.eq_ignore_ascii_case("youtube") {
            Some(format!("https://www.youtube.com/watch?v={}", self.key))
        } else {
            None
        }
    }

    pub fn is_trailer(&self) -> bool {
        self.video_type == "Trailer"
    }
}

/// One entry of a person's combined filmography
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonCredit {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub character: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: f32,
}

// =============================================================================
// Session Models
// =============================================================================

/// Login state produced by the auth flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Session {
    /// Approved user session
    User {
        session_id: String,
        account_id: String,
        access_token: String,
    },
    /// Anonymous guest session
    Guest {
        guest_session_id: String,
        expires_at: Option<String>,
    },
}

impl Session {
    pub fn is_guest(&self) -> bool {
        matches!(self, Session::Guest { .. })
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Session::User { account_id, .. } => write!(f, "Logged in ({})", account_id),
            Session::Guest { .. } => write!(f, "Guest"),
        }
    }
}

/// Extract year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}

//! TMDB (The Movie Database) API client
//!
//! One method per endpoint; each returns the raw DTO and leaves mapping to
//! the repositories. API docs: https://developer.themoviedb.org/docs

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::api::dto::{
    CombinedCreditsDto, CreditsDto, MovieDetailDto, MovieDto, PageDto, PersonDetailDto,
    PersonDto, TvShowDetailDto, TvShowDto, VideosDto,
};
use crate::models::ListQuery;

/// Root of the TMDB API; v3 and v4 paths hang off it
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Unauthorized (401), check the TMDB API token")]
    Unauthorized,

    #[error("Rate limited (429)")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("TMDB error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

impl TmdbError {
    /// True for transport-level failures (timeout, no connectivity)
    pub fn is_network(&self) -> bool {
        matches!(self, TmdbError::RequestFailed(_))
    }
}

/// Error body TMDB sends alongside non-2xx statuses
#[derive(Debug, Deserialize)]
struct StatusBody {
    status_message: Option<String>,
}

/// TMDB API client
#[derive(Debug, Clone)]
pub struct TmdbClient {
    token: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client with the given bearer token
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authenticated GET with query parameters
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = "GET", %path, "TMDB request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Authenticated request with a JSON body (POST/DELETE in the auth flow)
    pub(crate) async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, TmdbError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, %path, "TMDB request");

        let response = self
            .client
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TmdbError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return serde_json::from_str(&body)
                .map_err(|e| TmdbError::InvalidResponse(format!("JSON parse error: {}", e)));
        }

        match status {
            StatusCode::NOT_FOUND => Err(TmdbError::NotFound),
            StatusCode::UNAUTHORIZED => Err(TmdbError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(TmdbError::RateLimited),
            status if status.is_server_error() => Err(TmdbError::ServerError(status.as_u16())),
            status => {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<StatusBody>(&body)
                    .ok()
                    .and_then(|b| b.status_message)
                    .unwrap_or_else(|| {
                        status.canonical_reason().unwrap_or("Unknown error").to_string()
                    });
                Err(TmdbError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    // -------------------------------------------------------------------------
    // Movie lists
    // -------------------------------------------------------------------------

    pub async fn now_playing_movies(&self, query: &ListQuery) -> Result<PageDto<MovieDto>, TmdbError> {
        self.get("/3/movie/now_playing", &list_params(query)?).await
    }

    pub async fn popular_movies(&self, query: &ListQuery) -> Result<PageDto<MovieDto>, TmdbError> {
        self.get("/3/movie/popular", &list_params(query)?).await
    }

    pub async fn top_rated_movies(&self, query: &ListQuery) -> Result<PageDto<MovieDto>, TmdbError> {
        self.get("/3/movie/top_rated", &list_params(query)?).await
    }

    pub async fn upcoming_movies(&self, query: &ListQuery) -> Result<PageDto<MovieDto>, TmdbError> {
        self.get("/3/movie/upcoming", &list_params(query)?).await
    }

    pub async fn discover_movies(&self, query: &ListQuery) -> Result<PageDto<MovieDto>, TmdbError> {
        self.get("/3/discover/movie", &discover_params(query)?).await
    }

    // -------------------------------------------------------------------------
    // Movie details
    // -------------------------------------------------------------------------

    pub async fn movie_details(&self, id: u64, language: &str) -> Result<MovieDetailDto, TmdbError> {
        self.get(&format!("/3/movie/{}", id), &language_param(language))
            .await
    }

    pub async fn movie_credits(&self, id: u64, language: &str) -> Result<CreditsDto, TmdbError> {
        self.get(&format!("/3/movie/{}/credits", id), &language_param(language))
            .await
    }

    pub async fn movie_videos(&self, id: u64, language: &str) -> Result<VideosDto, TmdbError> {
        self.get(&format!("/3/movie/{}/videos", id), &language_param(language))
            .await
    }

    pub async fn similar_movies(
        &self,
        id: u64,
        query: &ListQuery,
    ) -> Result<PageDto<MovieDto>, TmdbError> {
        self.get(&format!("/3/movie/{}/similar", id), &list_params(query)?)
            .await
    }

    // -------------------------------------------------------------------------
    // TV lists
    // -------------------------------------------------------------------------

    pub async fn airing_today_tv(&self, query: &ListQuery) -> Result<PageDto<TvShowDto>, TmdbError> {
        self.get("/3/tv/airing_today", &list_params(query)?).await
    }

    pub async fn on_the_air_tv(&self, query: &ListQuery) -> Result<PageDto<TvShowDto>, TmdbError> {
        self.get("/3/tv/on_the_air", &list_params(query)?).await
    }

    pub async fn popular_tv(&self, query: &ListQuery) -> Result<PageDto<TvShowDto>, TmdbError> {
        self.get("/3/tv/popular", &list_params(query)?).await
    }

    pub async fn top_rated_tv(&self, query: &ListQuery) -> Result<PageDto<TvShowDto>, TmdbError> {
        self.get("/3/tv/top_rated", &list_params(query)?).await
    }

    pub async fn discover_tv(&self, query: &ListQuery) -> Result<PageDto<TvShowDto>, TmdbError> {
        self.get("/3/discover/tv", &discover_params(query)?).await
    }

    // -------------------------------------------------------------------------
    // TV details
    // -------------------------------------------------------------------------

    pub async fn tv_details(&self, id: u64, language: &str) -> Result<TvShowDetailDto, TmdbError> {
        self.get(&format!("/3/tv/{}", id), &language_param(language))
            .await
    }

    pub async fn tv_credits(&self, id: u64, language: &str) -> Result<CreditsDto, TmdbError> {
        self.get(&format!("/3/tv/{}/credits", id), &language_param(language))
            .await
    }

    pub async fn tv_videos(&self, id: u64, language: &str) -> Result<VideosDto, TmdbError> {
        self.get(&format!("/3/tv/{}/videos", id), &language_param(language))
            .await
    }

    pub async fn similar_tv(
        &self,
        id: u64,
        query: &ListQuery,
    ) -> Result<PageDto<TvShowDto>, TmdbError> {
        self.get(&format!("/3/tv/{}/similar", id), &list_params(query)?)
            .await
    }

    // -------------------------------------------------------------------------
    // People
    // -------------------------------------------------------------------------

    pub async fn popular_people(&self, query: &ListQuery) -> Result<PageDto<PersonDto>, TmdbError> {
        self.get("/3/person/popular", &list_params(query)?).await
    }

    pub async fn person_details(
        &self,
        id: u64,
        language: &str,
    ) -> Result<PersonDetailDto, TmdbError> {
        self.get(&format!("/3/person/{}", id), &language_param(language))
            .await
    }

    pub async fn person_combined_credits(
        &self,
        id: u64,
        language: &str,
    ) -> Result<CombinedCreditsDto, TmdbError> {
        self.get(
            &format!("/3/person/{}/combined_credits", id),
            &language_param(language),
        )
        .await
    }
}

/// Query parameters shared by all list endpoints
fn list_params(query: &ListQuery) -> Result<Vec<(&'static str, String)>, TmdbError> {
    if query.page == 0 {
        return Err(TmdbError::InvalidRequest("page must be >= 1".into()));
    }

    let mut params = vec![
        ("language", query.language.clone()),
        ("page", query.page.to_string()),
    ];
    if let Some(ref region) = query.region {
        params.push(("region", region.clone()));
    }
    Ok(params)
}

fn discover_params(query: &ListQuery) -> Result<Vec<(&'static str, String)>, TmdbError> {
    let mut params = list_params(query)?;
    params.push(("sort_by", "popularity.desc".to_string()));
    Ok(params)
}

fn language_param(language: &str) -> Vec<(&'static str, String)> {
    vec![("language", language.to_string())]
}

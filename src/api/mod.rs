//! API clients for TMDB
//!
//! - `tmdb`: the REST client, one method per endpoint
//! - `dto`: wire structures and their mapping to domain models
//! - `auth`: request-token, session and guest-session endpoints

pub mod auth;
pub mod dto;
pub mod tmdb;

pub use auth::{AccessToken, AuthApi, GuestSession, RequestToken};
pub use tmdb::{TmdbClient, TmdbError, DEFAULT_BASE_URL};

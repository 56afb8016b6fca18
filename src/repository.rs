//! Repositories over the TMDB client
//!
//! List methods hand errors straight back to the caller (the pager turns them
//! into load-state errors). Detail methods wrap their result in [`Outcome`].

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::api::dto::{MovieDto, PersonDto, TvShowDto};
use crate::api::{TmdbClient, TmdbError};
use crate::models::{
    Credits, ListQuery, Movie, MovieDetail, Outcome, Page, Person, PersonCredit, PersonDetail,
    TvShow, TvShowDetail, Video,
};

#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn now_playing(&self, query: &ListQuery) -> Result<Page<Movie>, TmdbError>;
    async fn popular(&self, query: &ListQuery) -> Result<Page<Movie>, TmdbError>;
    async fn top_rated(&self, query: &ListQuery) -> Result<Page<Movie>, TmdbError>;
    async fn upcoming(&self, query: &ListQuery) -> Result<Page<Movie>, TmdbError>;
    async fn discover(&self, query: &ListQuery) -> Result<Page<Movie>, TmdbError>;

    async fn details(&self, id: u64, language: &str) -> Outcome<MovieDetail>;
    async fn credits(&self, id: u64, language: &str) -> Outcome<Credits>;
    async fn videos(&self, id: u64, language: &str) -> Outcome<Vec<Video>>;
    async fn similar(&self, id: u64, query: &ListQuery) -> Outcome<Page<Movie>>;
}

#[async_trait]
pub trait TvShowRepository: Send + Sync {
    async fn airing_today(&self, query: &ListQuery) -> Result<Page<TvShow>, TmdbError>;
    async fn on_the_air(&self, query: &ListQuery) -> Result<Page<TvShow>, TmdbError>;
    async fn popular(&self, query: &ListQuery) -> Result<Page<TvShow>, TmdbError>;
    async fn top_rated(&self, query: &ListQuery) -> Result<Page<TvShow>, TmdbError>;
    async fn discover(&self, query: &ListQuery) -> Result<Page<TvShow>, TmdbError>;

    async fn details(&self, id: u64, language: &str) -> Outcome<TvShowDetail>;
    async fn credits(&self, id: u64, language: &str) -> Outcome<Credits>;
    async fn videos(&self, id: u64, language: &str) -> Outcome<Vec<Video>>;
    async fn similar(&self, id: u64, query: &ListQuery) -> Outcome<Page<TvShow>>;
}

#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn popular(&self, query: &ListQuery) -> Result<Page<Person>, TmdbError>;

    async fn details(&self, id: u64, language: &str) -> Outcome<PersonDetail>;
    async fn combined_credits(&self, id: u64, language: &str) -> Outcome<Vec<PersonCredit>>;
}

macro_rules! debug_dyn {
    ($($name:ident),+) => {
        $(
            impl fmt::Debug for dyn $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(stringify!($name))
                }
            }
        )+
    };
}

debug_dyn!(MovieRepository, TvShowRepository, PersonRepository);

/// Repository implementation backed by [`TmdbClient`]
#[derive(Debug, Clone)]
pub struct TmdbRepository {
    client: Arc<TmdbClient>,
}

impl TmdbRepository {
    pub fn new(client: Arc<TmdbClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<TmdbClient> {
        &self.client
    }
}

#[async_trait]
impl MovieRepository for TmdbRepository {
    async fn now_playing(&self, query: &ListQuery) -> Result<Page<Movie>, TmdbError> {
        let dto = self.client.now_playing_movies(query).await?;
        Ok(dto.into_page(MovieDto::into_movie))
    }

    async fn popular(&self, query: &ListQuery) -> Result<Page<Movie>, TmdbError> {
        let dto = self.client.popular_movies(query).await?;
        Ok(dto.into_page(MovieDto::into_movie))
    }

    async fn top_rated(&self, query: &ListQuery) -> Result<Page<Movie>, TmdbError> {
        let dto = self.client.top_rated_movies(query).await?;
        Ok(dto.into_page(MovieDto::into_movie))
    }

    async fn upcoming(&self, query: &ListQuery) -> Result<Page<Movie>, TmdbError> {
        let dto = self.client.upcoming_movies(query).await?;
        Ok(dto.into_page(MovieDto::into_movie))
    }

    async fn discover(&self, query: &ListQuery) -> Result<Page<Movie>, TmdbError> {
        let dto = self.client.discover_movies(query).await?;
        Ok(dto.into_page(MovieDto::into_movie))
    }

    async fn details(&self, id: u64, language: &str) -> Outcome<MovieDetail> {
        self.client
            .movie_details(id, language)
            .await
            .map(|dto| dto.into_detail())
            .into()
    }

    async fn credits(&self, id: u64, language: &str) -> Outcome<Credits> {
        self.client
            .movie_credits(id, language)
            .await
            .map(|dto| dto.into_credits())
            .into()
    }

    async fn videos(&self, id: u64, language: &str) -> Outcome<Vec<Video>> {
        self.client
            .movie_videos(id, language)
            .await
            .map(|dto| dto.into_videos())
            .into()
    }

    async fn similar(&self, id: u64, query: &ListQuery) -> Outcome<Page<Movie>> {
        self.client
            .similar_movies(id, query)
            .await
            .map(|dto| dto.into_page(MovieDto::into_movie))
            .into()
    }
}

#[async_trait]
impl TvShowRepository for TmdbRepository {
    async fn airing_today(&self, query: &ListQuery) -> Result<Page<TvShow>, TmdbError> {
        let dto = self.client.airing_today_tv(query).await?;
        Ok(dto.into_page(TvShowDto::into_tv_show))
    }

    async fn on_the_air(&self, query: &ListQuery) -> Result<Page<TvShow>, TmdbError> {
        let dto = self.client.on_the_air_tv(query).await?;
        Ok(dto.into_page(TvShowDto::into_tv_show))
    }

    async fn popular(&self, query: &ListQuery) -> Result<Page<TvShow>, TmdbError> {
        let dto = self.client.popular_tv(query).await?;
        Ok(dto.into_page(TvShowDto::into_tv_show))
    }

    async fn top_rated(&self, query: &ListQuery) -> Result<Page<TvShow>, TmdbError> {
        let dto = self.client.top_rated_tv(query).await?;
        Ok(dto.into_page(TvShowDto::into_tv_show))
    }

    async fn discover(&self, query: &ListQuery) -> Result<Page<TvShow>, TmdbError> {
        let dto = self.client.discover_tv(query).await?;
        Ok(dto.into_page(TvShowDto::into_tv_show))
    }

    async fn details(&self, id: u64, language: &str) -> Outcome<TvShowDetail> {
        self.client
            .tv_details(id, language)
            .await
            .map(|dto| dto.into_detail())
            .into()
    }

    async fn credits(&self, id: u64, language: &str) -> Outcome<Credits> {
        self.client
            .tv_credits(id, language)
            .await
            .map(|dto| dto.into_credits())
            .into()
    }

    async fn videos(&self, id: u64, language: &str) -> Outcome<Vec<Video>> {
        self.client
            .tv_videos(id, language)
            .await
            .map(|dto| dto.into_videos())
            .into()
    }

    async fn similar(&self, id: u64, query: &ListQuery) -> Outcome<Page<TvShow>> {
        self.client
            .similar_tv(id, query)
            .await
            .map(|dto| dto.into_page(TvShowDto::into_tv_show))
            .into()
    }
}

#[async_trait]
impl PersonRepository for TmdbRepository {
    async fn popular(&self, query: &ListQuery) -> Result<Page<Person>, TmdbError> {
        let dto = self.client.popular_people(query).await?;
        Ok(dto.into_page(PersonDto::into_person))
    }

    async fn details(&self, id: u64, language: &str) -> Outcome<PersonDetail> {
        self.client
            .person_details(id, language)
            .await
            .map(|dto| dto.into_detail())
            .into()
    }

    async fn combined_credits(&self, id: u64, language: &str) -> Outcome<Vec<PersonCredit>> {
        self.client
            .person_combined_credits(id, language)
            .await
            .map(|dto| dto.into_credits())
            .into()
    }
}

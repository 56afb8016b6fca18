//! Shared fixtures for the integration tests
//!
//! JSON bodies shaped like TMDB responses, DTO/model comparison helpers and a
//! fake repository that records which endpoint each call would have hit.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;

use ihenkiri::api::dto::{MovieDto, PersonDto};
use ihenkiri::models::{
    Credits, Genre, ListQuery, MediaType, Movie, MovieDetail, Outcome, Page, Person,
    PersonCredit, PersonDetail, TvShow, TvShowDetail, Video,
};
use ihenkiri::repository::{MovieRepository, PersonRepository, TvShowRepository};
use ihenkiri::TmdbError;

// =============================================================================
// JSON fixtures
// =============================================================================

pub const MOVIE_PAGE_JSON: &str = r#"{
    "page": 1,
    "results": [
        {
            "id": 550,
            "title": "Fight Club",
            "original_title": "Fight Club",
            "overview": "A ticking-time-bomb insomniac and a slippery soap salesman...",
            "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            "backdrop_path": "/hZkgoQYus5vegHoetLkCJzb17zJ.jpg",
            "release_date": "1999-10-15",
            "vote_average": 8.4,
            "vote_count": 26280,
            "popularity": 61.4,
            "genre_ids": [18, 53]
        },
        {
            "id": 680,
            "title": "Pulp Fiction",
            "original_title": "Pulp Fiction",
            "overview": "A burger-loving hit man...",
            "poster_path": null,
            "backdrop_path": null,
            "release_date": "",
            "vote_average": null,
            "vote_count": null,
            "popularity": null
        }
    ],
    "total_pages": 3,
    "total_results": 60
}"#;

pub const TV_PAGE_JSON: &str = r#"{
    "page": 2,
    "results": [
        {
            "id": 1396,
            "name": "Breaking Bad",
            "original_name": "Breaking Bad",
            "overview": "A chemistry teacher diagnosed with cancer...",
            "poster_path": "/ggFHVNu6YYI5L9pCfOacjizRGt.jpg",
            "first_air_date": "2008-01-20",
            "vote_average": 8.9,
            "vote_count": 14000,
            "popularity": 300.1,
            "genre_ids": [18, 80],
            "origin_country": ["US"]
        }
    ],
    "total_pages": 2,
    "total_results": 21
}"#;

pub const PEOPLE_PAGE_JSON: &str = r#"{
    "page": 1,
    "results": [
        {
            "id": 287,
            "name": "Brad Pitt",
            "known_for_department": "Acting",
            "profile_path": "/cckcYc2v0yh1tc9QjRelptcOBko.jpg",
            "popularity": 40.2,
            "known_for": [
                { "title": "Fight Club" },
                { "name": "Friends" },
                { }
            ]
        }
    ],
    "total_pages": 500,
    "total_results": 10000
}"#;

pub const MOVIE_DETAIL_JSON: &str = r#"{
    "id": 550,
    "imdb_id": "tt0137523",
    "title": "Fight Club",
    "tagline": "Mischief. Mayhem. Soap.",
    "overview": "A ticking-time-bomb insomniac...",
    "runtime": 139,
    "release_date": "1999-10-15",
    "status": "Released",
    "genres": [{ "id": 18, "name": "Drama" }],
    "vote_average": 8.4,
    "vote_count": 26280,
    "budget": 63000000,
    "revenue": 100853753,
    "homepage": "http://www.foxmovies.com/movies/fight-club",
    "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
    "backdrop_path": null
}"#;

pub const CREDITS_JSON: &str = r#"{
    "id": 550,
    "cast": [
        { "id": 819, "name": "Edward Norton", "character": "The Narrator", "profile_path": null, "order": 0 },
        { "id": 287, "name": "Brad Pitt", "character": "Tyler Durden", "profile_path": null, "order": 1 }
    ],
    "crew": [
        { "id": 7467, "name": "David Fincher", "job": "Director", "department": "Directing", "profile_path": null }
    ]
}"#;

pub const VIDEOS_JSON: &str = r#"{
    "id": 550,
    "results": [
        { "id": "5c9294240e0a267cd516835f", "key": "BdJKm16Co6M", "name": "Fight Club - Trailer", "site": "YouTube", "type": "Trailer", "official": true }
    ]
}"#;

// =============================================================================
// Comparison helpers
// =============================================================================

/// True when `movie` is what `dto` should map to
pub fn equals_movie(dto: &MovieDto, movie: &Movie) -> bool {
    let title = dto.title.clone().unwrap_or_default();
    dto.id == movie.id
        && title == movie.title
        && dto.original_title.clone().unwrap_or_else(|| title.clone()) == movie.original_title
        && dto.overview.clone().unwrap_or_default() == movie.overview
        && dto.poster_path == movie.poster_path
        && dto.backdrop_path == movie.backdrop_path
        && dto.release_date.clone().filter(|d| !d.is_empty()) == movie.release_date
        && dto.vote_average.unwrap_or(0.0) == movie.vote_average
        && dto.vote_count.unwrap_or(0) == movie.vote_count
        && dto.genre_ids == movie.genre_ids
}

/// True when `person` is what `dto` should map to
pub fn equals_person(dto: &PersonDto, person: &Person) -> bool {
    let known_for: Vec<String> = dto
        .known_for
        .iter()
        .filter_map(|k| k.title.clone().or_else(|| k.name.clone()))
        .collect();
    dto.id == person.id
        && dto.name == person.name
        && dto.known_for_department == person.known_for_department
        && dto.profile_path == person.profile_path
        && dto.popularity.unwrap_or(0.0) == person.popularity
        && known_for == person.known_for
}

// =============================================================================
// Model builders
// =============================================================================

pub fn movie(id: u64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        original_title: title.to_string(),
        overview: String::new(),
        poster_path: None,
        backdrop_path: None,
        release_date: Some("2020-01-01".to_string()),
        vote_average: 7.0,
        vote_count: 100,
        popularity: 10.0,
        genre_ids: Vec::new(),
    }
}

pub fn tv_show(id: u64, name: &str) -> TvShow {
    TvShow {
        id,
        name: name.to_string(),
        original_name: name.to_string(),
        overview: String::new(),
        poster_path: None,
        backdrop_path: None,
        first_air_date: Some("2015-06-01".to_string()),
        vote_average: 8.0,
        vote_count: 50,
        popularity: 5.0,
        genre_ids: Vec::new(),
        origin_country: vec!["US".to_string()],
    }
}

pub fn person(id: u64, name: &str) -> Person {
    Person {
        id,
        name: name.to_string(),
        known_for_department: Some("Acting".to_string()),
        profile_path: None,
        popularity: 1.0,
        known_for: vec!["Some Film".to_string()],
    }
}

/// The seven movies every fake movie endpoint returns
pub fn seven_movies() -> Vec<Movie> {
    [
        "The Shawshank Redemption",
        "The Godfather",
        "The Dark Knight",
        "12 Angry Men",
        "Schindler's List",
        "Spirited Away",
        "Parasite",
    ]
    .iter()
    .enumerate()
    .map(|(i, title)| movie(i as u64 + 1, title))
    .collect()
}

fn one_page<T>(items: Vec<T>, page: u32, total_pages: u32) -> Page<T> {
    Page {
        page,
        total_results: items.len() as u32 * total_pages,
        items,
        total_pages,
    }
}

// =============================================================================
// Fake repository
// =============================================================================

/// Repository returning fixed data and recording the endpoint of every call
#[derive(Debug)]
pub struct FakeRepository {
    pub calls: Mutex<Vec<String>>,
    /// Pages each list endpoint reports
    pub total_pages: u32,
    /// Make the secondary detail calls (credits, videos, similar) fail
    pub fail_secondary: bool,
    /// Make the primary detail call fail
    pub fail_details: bool,
}

impl Default for FakeRepository {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            total_pages: 1,
            fail_secondary: false,
            fail_details: false,
        }
    }
}

impl FakeRepository {
    pub fn with_pages(total_pages: u32) -> Self {
        Self {
            total_pages,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn movies(&self, endpoint: &str, query: &ListQuery) -> Result<Page<Movie>, TmdbError> {
        self.record(format!("{}:{}", endpoint, query.page));
        Ok(one_page(seven_movies(), query.page, self.total_pages))
    }

    fn shows(&self, endpoint: &str, query: &ListQuery) -> Result<Page<TvShow>, TmdbError> {
        self.record(format!("{}:{}", endpoint, query.page));
        let shows = (1..=3).map(|i| tv_show(i, &format!("Show {}", i))).collect();
        Ok(one_page(shows, query.page, self.total_pages))
    }

    fn secondary<T>(&self, data: T) -> Outcome<T> {
        if self.fail_secondary {
            Outcome::Failure("HTTP 500".to_string())
        } else {
            Outcome::Success(data)
        }
    }
}

#[async_trait]
impl MovieRepository for FakeRepository {
    async fn now_playing(&self, query: &ListQuery) -> Result<Page<Movie>, TmdbError> {
        self.movies("movie/now_playing", query)
    }

    async fn popular(&self, query: &ListQuery) -> Result<Page<Movie>, TmdbError> {
        self.movies("movie/popular", query)
    }

    async fn top_rated(&self, query: &ListQuery) -> Result<Page<Movie>, TmdbError> {
        self.movies("movie/top_rated", query)
    }

    async fn upcoming(&self, query: &ListQuery) -> Result<Page<Movie>, TmdbError> {
        self.movies("movie/upcoming", query)
    }

    async fn discover(&self, query: &ListQuery) -> Result<Page<Movie>, TmdbError> {
        self.movies("discover/movie", query)
    }

    async fn details(&self, id: u64, _language: &str) -> Outcome<MovieDetail> {
        self.record(format!("movie/{}", id));
        if self.fail_details {
            return Outcome::Failure("Resource not found (404)".to_string());
        }
        Outcome::Success(MovieDetail {
            id,
            imdb_id: None,
            title: "Fight Club".to_string(),
            tagline: Some("Mischief. Mayhem. Soap.".to_string()),
            overview: "An insomniac office worker...".to_string(),
            runtime: Some(139),
            release_date: Some("1999-10-15".to_string()),
            status: Some("Released".to_string()),
            genres: vec![Genre {
                id: 18,
                name: "Drama".to_string(),
            }],
            vote_average: 8.4,
            vote_count: 26280,
            budget: 63_000_000,
            revenue: 100_853_753,
            homepage: None,
            poster_path: Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg".to_string()),
            backdrop_path: None,
        })
    }

    async fn credits(&self, id: u64, _language: &str) -> Outcome<Credits> {
        self.record(format!("movie/{}/credits", id));
        self.secondary(Credits::default())
    }

    async fn videos(&self, id: u64, _language: &str) -> Outcome<Vec<Video>> {
        self.record(format!("movie/{}/videos", id));
        self.secondary(Vec::new())
    }

    async fn similar(&self, id: u64, query: &ListQuery) -> Outcome<Page<Movie>> {
        self.record(format!("movie/{}/similar", id));
        self.secondary(one_page(seven_movies(), query.page, 1))
    }
}

#[async_trait]
impl TvShowRepository for FakeRepository {
    async fn airing_today(&self, query: &ListQuery) -> Result<Page<TvShow>, TmdbError> {
        self.shows("tv/airing_today", query)
    }

    async fn on_the_air(&self, query: &ListQuery) -> Result<Page<TvShow>, TmdbError> {
        self.shows("tv/on_the_air", query)
    }

    async fn popular(&self, query: &ListQuery) -> Result<Page<TvShow>, TmdbError> {
        self.shows("tv/popular", query)
    }

    async fn top_rated(&self, query: &ListQuery) -> Result<Page<TvShow>, TmdbError> {
        self.shows("tv/top_rated", query)
    }

    async fn discover(&self, query: &ListQuery) -> Result<Page<TvShow>, TmdbError> {
        self.shows("discover/tv", query)
    }

    async fn details(&self, id: u64, _language: &str) -> Outcome<TvShowDetail> {
        self.record(format!("tv/{}", id));
        if self.fail_details {
            return Outcome::Failure("Resource not found (404)".to_string());
        }
        Outcome::Success(TvShowDetail {
            id,
            name: "Show 1".to_string(),
            tagline: None,
            overview: String::new(),
            first_air_date: Some("2015-06-01".to_string()),
            last_air_date: None,
            status: Some("Returning Series".to_string()),
            number_of_seasons: 0,
            number_of_episodes: 0,
            episode_run_time: Vec::new(),
            genres: Vec::new(),
            networks: vec!["HBO".to_string()],
            seasons: Vec::new(),
            vote_average: 8.0,
            poster_path: None,
            backdrop_path: None,
        })
    }

    async fn credits(&self, id: u64, _language: &str) -> Outcome<Credits> {
        self.record(format!("tv/{}/credits", id));
        self.secondary(Credits::default())
    }

    async fn videos(&self, id: u64, _language: &str) -> Outcome<Vec<Video>> {
        self.record(format!("tv/{}/videos", id));
        self.secondary(Vec::new())
    }

    async fn similar(&self, id: u64, query: &ListQuery) -> Outcome<Page<TvShow>> {
        self.record(format!("tv/{}/similar", id));
        self.secondary(one_page(vec![tv_show(9, "Similar Show")], query.page, 1))
    }
}

#[async_trait]
impl PersonRepository for FakeRepository {
    async fn popular(&self, query: &ListQuery) -> Result<Page<Person>, TmdbError> {
        self.record(format!("person/popular:{}", query.page));
        let people = (1..=4).map(|i| person(i, &format!("Person {}", i))).collect();
        Ok(one_page(people, query.page, self.total_pages))
    }

    async fn details(&self, id: u64, _language: &str) -> Outcome<PersonDetail> {
        self.record(format!("person/{}", id));
        if self.fail_details {
            return Outcome::Failure("Resource not found (404)".to_string());
        }
        Outcome::Success(PersonDetail {
            id,
            name: "Person 1".to_string(),
            biography: String::new(),
            birthday: Some("1963-12-18".to_string()),
            deathday: None,
            place_of_birth: Some("Shawnee, Oklahoma, USA".to_string()),
            known_for_department: Some("Acting".to_string()),
            also_known_as: Vec::new(),
            popularity: 40.0,
            profile_path: None,
        })
    }

    async fn combined_credits(&self, id: u64, _language: &str) -> Outcome<Vec<PersonCredit>> {
        self.record(format!("person/{}/combined_credits", id));
        self.secondary(vec![PersonCredit {
            id: 550,
            media_type: MediaType::Movie,
            title: "Fight Club".to_string(),
            character: Some("Tyler Durden".to_string()),
            poster_path: None,
            vote_average: 8.4,
        }])
    }
}

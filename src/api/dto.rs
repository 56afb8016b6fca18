//! Wire structures for TMDB JSON responses
//!
//! Fields TMDB may omit or null are optional here; the `into_*` methods turn
//! them into the domain models in [`crate::models`].

use serde::{Deserialize, Serialize};

use crate::models::{
    CastMember, Credits, CrewMember, Genre, MediaType, Movie, MovieDetail, Page, Person,
    PersonCredit, PersonDetail, SeasonSummary, TvShow, TvShowDetail, Video,
};

/// Paged envelope `{ page, results, total_pages, total_results }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDto<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> PageDto<T> {
    pub fn into_page<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            items: self.results.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: u64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f32>,
    pub vote_count: Option<u32>,
    pub popularity: Option<f32>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl MovieDto {
    pub fn into_movie(self) -> Movie {
        let title = self.title.unwrap_or_default();
        Movie {
            id: self.id,
            original_title: self.original_title.unwrap_or_else(|| title.clone()),
            title,
            overview: self.overview.unwrap_or_default(),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            release_date: non_empty(self.release_date),
            vote_average: self.vote_average.unwrap_or(0.0),
            vote_count: self.vote_count.unwrap_or(0),
            popularity: self.popularity.unwrap_or(0.0),
            genre_ids: self.genre_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShowDto {
    pub id: u64,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f32>,
    pub vote_count: Option<u32>,
    pub popularity: Option<f32>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub origin_country: Vec<String>,
}

impl TvShowDto {
    pub fn into_tv_show(self) -> TvShow {
        let name = self.name.unwrap_or_default();
        TvShow {
            id: self.id,
            original_name: self.original_name.unwrap_or_else(|| name.clone()),
            name,
            overview: self.overview.unwrap_or_default(),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            first_air_date: non_empty(self.first_air_date),
            vote_average: self.vote_average.unwrap_or(0.0),
            vote_count: self.vote_count.unwrap_or(0),
            popularity: self.popularity.unwrap_or(0.0),
            genre_ids: self.genre_ids,
            origin_country: self.origin_country,
        }
    }
}

/// `known_for` entry; movies carry `title`, shows carry `name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownForDto {
    pub title: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDto {
    pub id: u64,
    pub name: String,
    pub known_for_department: Option<String>,
    pub profile_path: Option<String>,
    pub popularity: Option<f32>,
    #[serde(default)]
    pub known_for: Vec<KnownForDto>,
}

impl PersonDto {
    pub fn into_person(self) -> Person {
        Person {
            id: self.id,
            name: self.name,
            known_for_department: self.known_for_department,
            profile_path: self.profile_path,
            popularity: self.popularity.unwrap_or(0.0),
            known_for: self
                .known_for
                .into_iter()
                .filter_map(|k| k.title.or(k.name))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreDto {
    pub id: u32,
    pub name: String,
}

impl GenreDto {
    fn into_genre(self) -> Genre {
        Genre {
            id: self.id,
            name: self.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetailDto {
    pub id: u64,
    pub imdb_id: Option<String>,
    pub title: String,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub runtime: Option<u32>,
    pub release_date: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreDto>,
    pub vote_average: Option<f32>,
    pub vote_count: Option<u32>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub homepage: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

impl MovieDetailDto {
    pub fn into_detail(self) -> MovieDetail {
        MovieDetail {
            id: self.id,
            imdb_id: non_empty(self.imdb_id),
            title: self.title,
            tagline: non_empty(self.tagline),
            overview: self.overview.unwrap_or_default(),
            runtime: self.runtime.filter(|r| *r > 0),
            release_date: non_empty(self.release_date),
            status: self.status,
            genres: self.genres.into_iter().map(GenreDto::into_genre).collect(),
            vote_average: self.vote_average.unwrap_or(0.0),
            vote_count: self.vote_count.unwrap_or(0),
            budget: self.budget.unwrap_or(0),
            revenue: self.revenue.unwrap_or(0),
            homepage: non_empty(self.homepage),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDto {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonDto {
    pub season_number: u16,
    #[serde(default)]
    pub episode_count: u16,
    pub name: Option<String>,
    pub air_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShowDetailDto {
    pub id: u64,
    pub name: String,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    pub status: Option<String>,
    pub number_of_seasons: Option<u16>,
    pub number_of_episodes: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub genres: Vec<GenreDto>,
    #[serde(default)]
    pub networks: Vec<NetworkDto>,
    #[serde(default)]
    pub seasons: Vec<SeasonDto>,
    pub vote_average: Option<f32>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

impl TvShowDetailDto {
    pub fn into_detail(self) -> TvShowDetail {
        // Season 0 holds specials
        let seasons = self
            .seasons
            .into_iter()
            .filter(|s| s.season_number > 0)
            .map(|s| SeasonSummary {
                season_number: s.season_number,
                episode_count: s.episode_count,
                name: s.name,
                air_date: non_empty(s.air_date),
            })
            .collect();

        TvShowDetail {
            id: self.id,
            name: self.name,
            tagline: non_empty(self.tagline),
            overview: self.overview.unwrap_or_default(),
            first_air_date: non_empty(self.first_air_date),
            last_air_date: non_empty(self.last_air_date),
            status: self.status,
            number_of_seasons: self.number_of_seasons.unwrap_or(0),
            number_of_episodes: self.number_of_episodes.unwrap_or(0),
            episode_run_time: self.episode_run_time,
            genres: self.genres.into_iter().map(GenreDto::into_genre).collect(),
            networks: self.networks.into_iter().map(|n| n.name).collect(),
            seasons,
            vote_average: self.vote_average.unwrap_or(0.0),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDetailDto {
    pub id: u64,
    pub name: String,
    pub biography: Option<String>,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub place_of_birth: Option<String>,
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub also_known_as: Vec<String>,
    pub popularity: Option<f32>,
    pub profile_path: Option<String>,
}

impl PersonDetailDto {
    pub fn into_detail(self) -> PersonDetail {
        PersonDetail {
            id: self.id,
            name: self.name,
            biography: self.biography.unwrap_or_default(),
            birthday: non_empty(self.birthday),
            deathday: non_empty(self.deathday),
            place_of_birth: non_empty(self.place_of_birth),
            known_for_department: self.known_for_department,
            also_known_as: self.also_known_as,
            popularity: self.popularity.unwrap_or(0.0),
            profile_path: self.profile_path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastDto {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewDto {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: String,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditsDto {
    #[serde(default)]
    pub cast: Vec<CastDto>,
    #[serde(default)]
    pub crew: Vec<CrewDto>,
}

impl CreditsDto {
    pub fn into_credits(self) -> Credits {
        let mut cast: Vec<CastMember> = self
            .cast
            .into_iter()
            .map(|c| CastMember {
                id: c.id,
                name: c.name,
                character: c.character.unwrap_or_default(),
                profile_path: c.profile_path,
                order: c.order,
            })
            .collect();
        cast.sort_by_key(|c| c.order);

        let crew = self
            .crew
            .into_iter()
            .map(|c| CrewMember {
                id: c.id,
                name: c.name,
                job: c.job,
                department: c.department,
                profile_path: c.profile_path,
            })
            .collect();

        Credits { cast, crew }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDto {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideosDto {
    #[serde(default)]
    pub results: Vec<VideoDto>,
}

impl VideosDto {
    pub fn into_videos(self) -> Vec<Video> {
        self.results
            .into_iter()
            .map(|v| Video {
                id: v.id,
                key: v.key,
                name: v.name,
                site: v.site,
                video_type: v.video_type,
                official: v.official,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedCastDto {
    pub id: u64,
    pub media_type: String,
    // Movies use "title", TV uses "name"
    pub title: Option<String>,
    pub name: Option<String>,
    pub character: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedCreditsDto {
    #[serde(default)]
    pub cast: Vec<CombinedCastDto>,
}

impl CombinedCreditsDto {
    pub fn into_credits(self) -> Vec<PersonCredit> {
        self.cast
            .into_iter()
            .filter_map(|c| {
                let media_type = match c.media_type.as_str() {
                    "movie" => MediaType::Movie,
                    "tv" => MediaType::Tv,
                    _ => return None,
                };
                Some(PersonCredit {
                    id: c.id,
                    media_type,
                    title: c.title.or(c.name).unwrap_or_default(),
                    character: non_empty(c.character),
                    poster_path: c.poster_path,
                    vote_average: c.vote_average.unwrap_or(0.0),
                })
            })
            .collect()
    }
}

/// TMDB sends "" for unknown dates and strings
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

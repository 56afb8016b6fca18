//! Screen state tests over a fake repository
//!
//! Covers filter dispatch, paging through the screens, stale page handling
//! and detail loading.

mod common;

use std::sync::Arc;

use common::{seven_movies, FakeRepository};
use ihenkiri::models::{FilterKind, ListQuery, MovieFilter, TvShowFilter};
use ihenkiri::screens::detail::{MOVIE_DETAILS_ERROR, PERSON_DETAILS_ERROR, TV_SHOW_DETAILS_ERROR};
use ihenkiri::screens::{
    DetailUiState, MovieDetailScreen, MoviesScreen, PeopleScreen, PersonDetailScreen,
    TvShowDetailScreen, TvShowsScreen,
};

fn query() -> ListQuery {
    ListQuery::new("en-US", None)
}

// =============================================================================
// Filter dispatch
// =============================================================================

#[tokio::test]
async fn test_movie_filters_hit_matching_endpoint() {
    let expected = [
        (MovieFilter::NowPlaying, "movie/now_playing:1"),
        (MovieFilter::Popular, "movie/popular:1"),
        (MovieFilter::TopRated, "movie/top_rated:1"),
        (MovieFilter::Upcoming, "movie/upcoming:1"),
        (MovieFilter::Discover, "discover/movie:1"),
    ];

    for (filter, endpoint) in expected {
        let repo = Arc::new(FakeRepository::default());
        let mut screen = MoviesScreen::new(repo.clone(), query());

        screen.on_filter_change(filter);
        assert!(screen.pager_mut().load_next().await);

        assert_eq!(repo.calls(), vec![endpoint], "filter {:?}", filter);
        assert_eq!(screen.active_filter(), filter);
    }
}

#[tokio::test]
async fn test_tv_filters_hit_matching_endpoint() {
    let expected = [
        (TvShowFilter::AiringToday, "tv/airing_today:1"),
        (TvShowFilter::OnTheAir, "tv/on_the_air:1"),
        (TvShowFilter::Popular, "tv/popular:1"),
        (TvShowFilter::TopRated, "tv/top_rated:1"),
        (TvShowFilter::Discover, "discover/tv:1"),
    ];

    for (filter, endpoint) in expected {
        let repo = Arc::new(FakeRepository::default());
        let mut screen = TvShowsScreen::new(repo.clone(), query());

        screen.on_filter_change(filter);
        screen.pager_mut().load_next().await;

        assert_eq!(repo.calls(), vec![endpoint], "filter {:?}", filter);
    }
}

#[test]
fn test_selecting_leaves_exactly_one_selected() {
    let repo = Arc::new(FakeRepository::default());
    let mut screen = MoviesScreen::new(repo, query());

    for &kind in MovieFilter::all() {
        screen.on_filter_change(kind);
        let options = screen.filter_state().snapshot();
        let selected: Vec<_> = options.iter().filter(|o| o.selected).collect();

        assert_eq!(options.len(), MovieFilter::all().len());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].kind, kind);
    }
}

#[tokio::test]
async fn test_filter_changes_are_published() {
    let repo = Arc::new(FakeRepository::default());
    let mut screen = TvShowsScreen::new(repo, query());
    let mut rx = screen.filters();

    screen.on_filter_change(TvShowFilter::TopRated);

    rx.changed().await.unwrap();
    let active: Vec<_> = rx.borrow().iter().filter(|o| o.selected).map(|o| o.kind).collect();
    assert_eq!(active, vec![TvShowFilter::TopRated]);
}

// =============================================================================
// Paging
// =============================================================================

#[tokio::test]
async fn test_seven_movies_survive_scrolling_past_the_end() {
    let repo = Arc::new(FakeRepository::default());
    let mut screen = MoviesScreen::new(repo, query());

    screen.on_filter_change(MovieFilter::NowPlaying);
    screen.pager_mut().load_next().await;

    while let Some(request) = screen.pager_mut().access(20) {
        let response = request.run().await;
        screen.pager_mut().apply(response);
    }

    let ids: Vec<u64> = screen.pager().items().iter().map(|m| m.id).collect();
    let expected: Vec<u64> = seven_movies().iter().map(|m| m.id).collect();
    assert!(ids.len() >= 7);
    assert_eq!(&ids[..7], &expected[..]);
    assert!(screen.pager().end_reached());
}

#[tokio::test]
async fn test_access_near_end_requests_next_page() {
    let repo = Arc::new(FakeRepository::with_pages(3));
    let mut screen = MoviesScreen::new(repo.clone(), query());

    screen.pager_mut().load_next().await;
    assert_eq!(screen.pager().len(), 7);

    // Far from the end: nothing to do
    assert!(screen.pager_mut().access(0).is_none());

    let request = screen.pager_mut().access(2).expect("within prefetch distance");
    assert_eq!(request.page(), 2);
    let response = request.run().await;
    assert!(screen.pager_mut().apply(response));

    assert_eq!(screen.pager().len(), 14);
    assert_eq!(
        repo.calls(),
        vec!["movie/now_playing:1", "movie/now_playing:2"]
    );
}

#[tokio::test]
async fn test_stale_page_after_filter_switch_is_dropped() {
    let repo = Arc::new(FakeRepository::default());
    let mut screen = MoviesScreen::new(repo.clone(), query());

    let stale = screen.pager_mut().next_request().unwrap();
    screen.on_filter_change(MovieFilter::Popular);

    let response = stale.run().await;
    assert!(!screen.pager_mut().apply(response));
    assert!(screen.pager().is_empty());

    screen.pager_mut().load_next().await;
    assert_eq!(screen.pager().len(), 7);
    assert_eq!(repo.calls(), vec!["movie/now_playing:1", "movie/popular:1"]);
}

#[tokio::test]
async fn test_concurrent_lists_load_independently() {
    let repo = Arc::new(FakeRepository::default());
    let mut movies = MoviesScreen::new(repo.clone(), query());
    let mut shows = TvShowsScreen::new(repo.clone(), query());
    let mut people = PeopleScreen::new(repo.clone(), query());

    let (m, s, p) = futures::join!(
        movies.pager_mut().load_next(),
        shows.pager_mut().load_next(),
        people.pager_mut().load_next(),
    );

    assert!(m && s && p);
    assert_eq!(movies.pager().len(), 7);
    assert_eq!(shows.pager().len(), 3);
    assert_eq!(people.pager().len(), 4);
    assert_eq!(repo.calls().len(), 3);
}

// =============================================================================
// Details
// =============================================================================

#[tokio::test]
async fn test_movie_detail_loads_everything() {
    let repo = Arc::new(FakeRepository::default());
    let mut screen = MovieDetailScreen::new(repo.clone(), query());

    screen.load(550).await;

    let details = screen.ui_state().data().expect("loaded");
    assert_eq!(details.movie.title, "Fight Club");
    assert_eq!(details.similar.len(), 7);

    let mut calls = repo.calls();
    calls.sort();
    assert_eq!(
        calls,
        vec![
            "movie/550",
            "movie/550/credits",
            "movie/550/similar",
            "movie/550/videos",
        ]
    );
}

#[tokio::test]
async fn test_secondary_failures_degrade_to_empty() {
    let repo = Arc::new(FakeRepository {
        fail_secondary: true,
        ..FakeRepository::default()
    });

    let movie = MovieDetailScreen::fetch(repo.as_ref(), &query(), 550).await;
    let details = movie.data().expect("details still load");
    assert!(details.credits.cast.is_empty());
    assert!(details.videos.is_empty());
    assert!(details.similar.is_empty());

    let person = PersonDetailScreen::fetch(repo.as_ref(), &query(), 287).await;
    assert!(person.data().expect("person loads").credits.is_empty());
}

#[tokio::test]
async fn test_primary_failure_maps_to_static_messages() {
    let repo = Arc::new(FakeRepository {
        fail_details: true,
        ..FakeRepository::default()
    });

    let (q1, q2, q3) = (query(), query(), query());
    let (movie, show, person) = futures::join!(
        MovieDetailScreen::fetch(repo.as_ref(), &q1, 1),
        TvShowDetailScreen::fetch(repo.as_ref(), &q2, 2),
        PersonDetailScreen::fetch(repo.as_ref(), &q3, 3),
    );

    assert_eq!(movie, DetailUiState::Error(MOVIE_DETAILS_ERROR.to_string()));
    assert_eq!(show.error(), Some(TV_SHOW_DETAILS_ERROR));
    assert_eq!(person.error(), Some(PERSON_DETAILS_ERROR));
}

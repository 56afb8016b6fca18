//! Movies list screen: filter chips dispatching to one endpoint each

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

use crate::api::TmdbError;
use crate::models::{FilterOption, ListQuery, Movie, MovieFilter, Page};
use crate::paging::{PagingSource, Pager};
use crate::repository::MovieRepository;
use crate::screens::filters::FilterState;

/// Page source bound to one filter
struct MovieQuery {
    repository: Arc<dyn MovieRepository>,
    filter: MovieFilter,
    query: ListQuery,
}

#[async_trait]
impl PagingSource<Movie> for MovieQuery {
    async fn load(&self, page: u32) -> Result<Page<Movie>, TmdbError> {
        let query = self.query.with_page(page);
        match self.filter {
            MovieFilter::NowPlaying => self.repository.now_playing(&query).await,
            MovieFilter::Popular => self.repository.popular(&query).await,
            MovieFilter::TopRated => self.repository.top_rated(&query).await,
            MovieFilter::Upcoming => self.repository.upcoming(&query).await,
            MovieFilter::Discover => self.repository.discover(&query).await,
        }
    }
}

/// State of the movies screen
#[derive(Debug)]
pub struct MoviesScreen {
    repository: Arc<dyn MovieRepository>,
    query: ListQuery,
    filters: FilterState<MovieFilter>,
    pager: Pager<Movie>,
}

impl MoviesScreen {
    pub fn new(repository: Arc<dyn MovieRepository>, query: ListQuery) -> Self {
        let filters = FilterState::default();
        let pager = Pager::new(Self::source(&repository, filters.active(), &query));
        Self {
            repository,
            query,
            filters,
            pager,
        }
    }

    fn source(
        repository: &Arc<dyn MovieRepository>,
        filter: MovieFilter,
        query: &ListQuery,
    ) -> Arc<dyn PagingSource<Movie>> {
        Arc::new(MovieQuery {
            repository: Arc::clone(repository),
            filter,
            query: query.clone(),
        })
    }

    /// Select `kind`, publish the new chip set and restart paging from page 1
    pub fn on_filter_change(&mut self, kind: MovieFilter) {
        self.filters.select(kind);
        self.pager
            .invalidate(Self::source(&self.repository, kind, &self.query));
    }

    pub fn filters(&self) -> watch::Receiver<Vec<FilterOption<MovieFilter>>> {
        self.filters.subscribe()
    }

    pub fn filter_state(&self) -> &FilterState<MovieFilter> {
        &self.filters
    }

    pub fn active_filter(&self) -> MovieFilter {
        self.filters.active()
    }

    pub fn pager(&self) -> &Pager<Movie> {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut Pager<Movie> {
        &mut self.pager
    }
}

//! TV shows list screen

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

use crate::api::TmdbError;
use crate::models::{FilterOption, ListQuery, Page, TvShow, TvShowFilter};
use crate::paging::{PagingSource, Pager};
use crate::repository::TvShowRepository;
use crate::screens::filters::FilterState;

struct TvShowQuery {
    repository: Arc<dyn TvShowRepository>,
    filter: TvShowFilter,
    query: ListQuery,
}

#[async_trait]
impl PagingSource<TvShow> for TvShowQuery {
    async fn load(&self, page: u32) -> Result<Page<TvShow>, TmdbError> {
        let query = self.query.with_page(page);
        match self.filter {
            TvShowFilter::AiringToday => self.repository.airing_today(&query).await,
            TvShowFilter::OnTheAir => self.repository.on_the_air(&query).await,
            TvShowFilter::Popular => self.repository.popular(&query).await,
            TvShowFilter::TopRated => self.repository.top_rated(&query).await,
            TvShowFilter::Discover => self.repository.discover(&query).await,
        }
    }
}

/// State of the TV shows screen
#[derive(Debug)]
pub struct TvShowsScreen {
    repository: Arc<dyn TvShowRepository>,
    query: ListQuery,
    filters: FilterState<TvShowFilter>,
    pager: Pager<TvShow>,
}

impl TvShowsScreen {
    pub fn new(repository: Arc<dyn TvShowRepository>, query: ListQuery) -> Self {
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
        repository: &Arc<dyn TvShowRepository>,
        filter: TvShowFilter,
        query: &ListQuery,
    ) -> Arc<dyn PagingSource<TvShow>> {
        Arc::new(TvShowQuery {
            repository: Arc::clone(repository),
            filter,
            query: query.clone(),
        })
    }

    /// Select `kind`, publish the new chip set and restart paging from page 1
    pub fn on_filter_change(&mut self, kind: TvShowFilter) {
        self.filters.select(kind);
        self.pager
            .invalidate(Self::source(&self.repository, kind, &self.query));
    }

    pub fn filters(&self) -> watch::Receiver<Vec<FilterOption<TvShowFilter>>> {
        self.filters.subscribe()
    }

    pub fn filter_state(&self) -> &FilterState<TvShowFilter> {
        &self.filters
    }

    pub fn active_filter(&self) -> TvShowFilter {
        self.filters.active()
    }

    pub fn pager(&self) -> &Pager<TvShow> {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut Pager<TvShow> {
        &mut self.pager
    }
}

//! Paginated item stream with load-state tracking
//!
//! A [`Pager`] turns a [`PagingSource`] ("fetch page N") into one growing list.
//! Loads are explicit values: [`Pager::next_request`] hands out a
//! [`PageRequest`] that can run on any task, and [`Pager::apply`] folds the
//! [`PageResponse`] back in. Every request carries the pager's generation, and
//! responses from before the last [`Pager::invalidate`] are dropped.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::TmdbError;
use crate::models::Page;

/// How close to the end of the list an access must be to trigger an append
pub const DEFAULT_PREFETCH_DISTANCE: usize = 5;

/// A "fetch page N" function
#[async_trait]
pub trait PagingSource<T>: Send + Sync {
    async fn load(&self, page: u32) -> Result<Page<T>, TmdbError>;
}

/// Load state of one direction of the pager
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotLoading { end_reached: bool },
    Loading,
    Error(String),
}

impl Default for LoadState {
    fn default() -> Self {
        LoadState::NotLoading { end_reached: false }
    }
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadState::Error(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Load states for the three directions. `prepend` never loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadStates {
    pub refresh: LoadState,
    pub append: LoadState,
    pub prepend: LoadState,
}

impl Default for LoadStates {
    fn default() -> Self {
        Self {
            refresh: LoadState::default(),
            append: LoadState::default(),
            prepend: LoadState::NotLoading { end_reached: true },
        }
    }
}

impl LoadStates {
    pub fn is_loading(&self) -> bool {
        self.refresh.is_loading() || self.append.is_loading()
    }

    /// First error of refresh/append, if any
    pub fn error(&self) -> Option<&str> {
        self.refresh.error().or_else(|| self.append.error())
    }
}

/// Whether a load fills an empty list or extends it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Refresh,
    Append,
}

/// A page load handed out by the pager
pub struct PageRequest<T> {
    source: Arc<dyn PagingSource<T>>,
    page: u32,
    generation: u64,
    kind: LoadKind,
}

impl<T> fmt::Debug for PageRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageRequest")
            .field("page", &self.page)
            .field("generation", &self.generation)
            .field("kind", &self.kind)
            .finish()
    }
}

impl<T> PageRequest<T> {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> LoadKind {
        self.kind
    }

    /// Fetch the page
    pub async fn run(self) -> PageResponse<T> {
        let result = self.source.load(self.page).await;
        PageResponse {
            page: self.page,
            generation: self.generation,
            kind: self.kind,
            result,
        }
    }
}

/// Result of a [`PageRequest`]
#[derive(Debug)]
pub struct PageResponse<T> {
    pub page: u32,
    pub generation: u64,
    pub kind: LoadKind,
    pub result: Result<Page<T>, TmdbError>,
}

/// Append-only paged list
pub struct Pager<T> {
    source: Arc<dyn PagingSource<T>>,
    generation: u64,
    items: Vec<T>,
    /// Page to load next; `None` once the last page has been applied
    next_page: Option<u32>,
    /// Page currently in flight
    in_flight: Option<u32>,
    states: LoadStates,
    prefetch_distance: usize,
}

impl<T> fmt::Debug for Pager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pager")
            .field("generation", &self.generation)
            .field("items", &self.items.len())
            .field("next_page", &self.next_page)
            .field("in_flight", &self.in_flight)
            .field("states", &self.states)
            .finish()
    }
}

impl<T> Pager<T> {
    pub fn new(source: Arc<dyn PagingSource<T>>) -> Self {
        Self {
            source,
            generation: 0,
            items: Vec::new(),
            next_page: Some(1),
            in_flight: None,
            states: LoadStates::default(),
            prefetch_distance: DEFAULT_PREFETCH_DISTANCE,
        }
    }

    pub fn with_prefetch_distance(mut self, distance: usize) -> Self {
        self.prefetch_distance = distance;
        self
    }

    /// Swap in a new source and restart from page 1.
    ///
    /// Requests handed out before this call become stale.
    pub fn invalidate(&mut self, source: Arc<dyn PagingSource<T>>) {
        self.source = source;
        self.generation += 1;
        self.items.clear();
        self.next_page = Some(1);
        self.in_flight = None;
        self.states = LoadStates::default();
    }

    /// Restart the current source from page 1
    pub fn refresh(&mut self) {
        let source = Arc::clone(&self.source);
        self.invalidate(source);
    }

    /// Next page to load, or `None` when a load is in flight, the end was
    /// reached, or the last load failed (see [`Pager::retry`]).
    pub fn next_request(&mut self) -> Option<PageRequest<T>> {
        if self.in_flight.is_some() || self.states.refresh.is_error() || self.states.append.is_error() {
            return None;
        }
        let page = self.next_page?;

        let kind = if self.items.is_empty() && page == 1 {
            self.states.refresh = LoadState::Loading;
            LoadKind::Refresh
        } else {
            self.states.append = LoadState::Loading;
            LoadKind::Append
        };
        self.in_flight = Some(page);

        Some(PageRequest {
            source: Arc::clone(&self.source),
            page,
            generation: self.generation,
            kind,
        })
    }

    /// Clear a load error and re-issue the failed page
    pub fn retry(&mut self) -> Option<PageRequest<T>> {
        if self.states.refresh.is_error() {
            self.states.refresh = LoadState::default();
        }
        if self.states.append.is_error() {
            self.states.append = LoadState::default();
        }
        self.next_request()
    }

    /// Fold a response in. Returns `false` if it was stale and dropped.
    pub fn apply(&mut self, response: PageResponse<T>) -> bool {
        if response.generation != self.generation || self.in_flight != Some(response.page) {
            debug!(
                page = response.page,
                generation = response.generation,
                current = self.generation,
                "dropping stale page"
            );
            return false;
        }
        self.in_flight = None;

        match response.result {
            Ok(page) => {
                self.next_page = page.next_page();
                let end_reached = self.next_page.is_none();
                self.items.extend(page.items);

                let done = LoadState::NotLoading { end_reached };
                match response.kind {
                    LoadKind::Refresh => {
                        self.states.refresh = LoadState::NotLoading { end_reached: false };
                        self.states.append = done;
                    }
                    LoadKind::Append => self.states.append = done,
                }
            }
            Err(e) => {
                warn!(page = response.page, error = %e, "page load failed");
                let state = LoadState::Error(e.to_string());
                match response.kind {
                    LoadKind::Refresh => self.states.refresh = state,
                    LoadKind::Append => self.states.append = state,
                }
            }
        }
        true
    }

    /// Record that the UI looked at `index`; returns a load when the index is
    /// within the prefetch distance of the end.
    pub fn access(&mut self, index: usize) -> Option<PageRequest<T>> {
        if index + self.prefetch_distance >= self.items.len() {
            self.next_request()
        } else {
            None
        }
    }

    /// Request, fetch and apply the next page in one step.
    ///
    /// Returns `false` when there was nothing to load.
    pub async fn load_next(&mut self) -> bool {
        match self.next_request() {
            Some(request) => {
                let response = request.run().await;
                self.apply(response)
            }
            None => false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn load_states(&self) -> &LoadStates {
        &self.states
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn end_reached(&self) -> bool {
        self.next_page.is_none()
    }
}

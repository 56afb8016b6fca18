//! Popular people list screen (no filters)

use async_trait::async_trait;
use std::sync::Arc;

use crate::api::TmdbError;
use crate::models::{ListQuery, Page, Person};
use crate::paging::{PagingSource, Pager};
use crate::repository::PersonRepository;

struct PopularPeople {
    repository: Arc<dyn PersonRepository>,
    query: ListQuery,
}

#[async_trait]
impl PagingSource<Person> for PopularPeople {
    async fn load(&self, page: u32) -> Result<Page<Person>, TmdbError> {
        self.repository.popular(&self.query.with_page(page)).await
    }
}

#[derive(Debug)]
pub struct PeopleScreen {
    pager: Pager<Person>,
}

impl PeopleScreen {
    pub fn new(repository: Arc<dyn PersonRepository>, query: ListQuery) -> Self {
        Self {
            pager: Pager::new(Arc::new(PopularPeople { repository, query })),
        }
    }

    pub fn pager(&self) -> &Pager<Person> {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut Pager<Person> {
        &mut self.pager
    }
}

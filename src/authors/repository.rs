pub mod ddb_author_repository;
pub mod memory_author_repository;

use std::collections::HashMap;
use async_trait::async_trait;
use crate::authors::domain::model::AuthorEntity;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;

pub(crate) const AUTHORS_TABLE: &str = "authors";
pub(crate) const AUTHORS_KEY: &str = "author_id";
pub(crate) const AUTHORS_INDEX: &str = "authors_ndx";

#[async_trait]
pub(crate) trait AuthorRepository: Repository<AuthorEntity> {
    // last name, then first name
    async fn list_by_name(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<AuthorEntity>> {
        self.query(&HashMap::new(), page, page_size).await
    }
}

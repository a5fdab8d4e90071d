pub mod ddb_book_repository;
pub mod memory_book_repository;

use std::collections::HashMap;
use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;

pub(crate) const BOOKS_TABLE: &str = "books";
pub(crate) const BOOKS_KEY: &str = "book_id";
pub(crate) const BOOKS_INDEX: &str = "books_ndx";

// Books are listed by title; isbn and author_id are filters.
#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    async fn list_by_title(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        self.query(&HashMap::new(), page, page_size).await
    }

    async fn find_by_author_id(&self, author_id: &str,
                               page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        self.query(&HashMap::from([("author_id".to_string(), author_id.to_string())]), page, page_size).await
    }

    // a store may return empty filtered pages before the match, so keep paging
    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>> {
        let predicate = HashMap::from([("isbn".to_string(), isbn.to_string())]);
        let mut page: Option<String> = None;
        loop {
            let res = self.query(&predicate, page.as_deref(), 100).await?;
            if let Some(book) = res.records.into_iter().next() {
                return Ok(Some(book));
            }
            match res.next_page {
                Some(next) => page = Some(next),
                None => return Ok(None),
            }
        }
    }
}

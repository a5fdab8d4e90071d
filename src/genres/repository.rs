pub mod ddb_genre_repository;
pub mod memory_genre_repository;

use std::collections::HashMap;
use async_trait::async_trait;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::genres::domain::model::GenreEntity;

pub(crate) const GENRES_TABLE: &str = "genres";
pub(crate) const GENRES_KEY: &str = "genre_id";
pub(crate) const GENRES_INDEX: &str = "genres_ndx";

// Genres are listed by name.
#[async_trait]
pub(crate) trait GenreRepository: Repository<GenreEntity> {
    async fn list_by_name(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<GenreEntity>> {
        self.query(&HashMap::new(), page, page_size).await
    }

    // genres of a book sorted by name; ids that no longer resolve are skipped
    async fn find_by_ids(&self, ids: &[String]) -> LibraryResult<Vec<GenreEntity>> {
        let mut genres = vec![];
        for id in ids {
            match self.get(id.as_str()).await {
                Ok(genre) => genres.push(genre),
                Err(LibraryError::NotFound { .. }) => {}
                Err(err) => return Err(err),
            }
        }
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }
}

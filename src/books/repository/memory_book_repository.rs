use std::collections::HashMap;
use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::memory::{MemoryTable, with_branch};

#[derive(Debug)]
pub struct MemoryBookRepository {
    table: MemoryTable,
    branch_id: String,
}

impl MemoryBookRepository {
    pub(crate) fn new(table: MemoryTable, branch_id: &str) -> Self {
        Self {
            table,
            branch_id: branch_id.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        self.table.put_new(entity)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        self.table.put_versioned(entity)
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        self.table.get(id)
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.table.delete(id)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        self.table.query(&with_branch(predicate, self.branch_id.as_str()), &["title"], page, page_size)
    }

    async fn count(&self, predicate: &HashMap<String, String>) -> LibraryResult<usize> {
        self.table.count(&with_branch(predicate, self.branch_id.as_str()))
    }
}

impl BookRepository for MemoryBookRepository {}

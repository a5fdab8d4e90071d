use std::collections::HashMap;
use async_trait::async_trait;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::instances::domain::model::BookInstanceEntity;
use crate::instances::repository::{BookInstanceRepository, is_status_query};
use crate::utils::memory::{MemoryTable, with_branch};

#[derive(Debug)]
pub struct MemoryBookInstanceRepository {
    table: MemoryTable,
    branch_id: String,
}

impl MemoryBookInstanceRepository {
    pub(crate) fn new(table: MemoryTable, branch_id: &str) -> Self {
        Self {
            table,
            branch_id: branch_id.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BookInstanceEntity> for MemoryBookInstanceRepository {
    async fn create(&self, entity: &BookInstanceEntity) -> LibraryResult<usize> {
        self.table.put_new(entity)
    }

    async fn update(&self, entity: &BookInstanceEntity) -> LibraryResult<usize> {
        self.table.put_versioned(entity)
    }

    async fn get(&self, id: &str) -> LibraryResult<BookInstanceEntity> {
        self.table.get(id)
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.table.delete(id)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookInstanceEntity>> {
        let order_by: &[&str] = if is_status_query(predicate) { &["due_sort"] } else { &["created_at"] };
        self.table.query(&with_branch(predicate, self.branch_id.as_str()), order_by, page, page_size)
    }

    async fn count(&self, predicate: &HashMap<String, String>) -> LibraryResult<usize> {
        self.table.count(&with_branch(predicate, self.branch_id.as_str()))
    }
}

impl BookInstanceRepository for MemoryBookInstanceRepository {}

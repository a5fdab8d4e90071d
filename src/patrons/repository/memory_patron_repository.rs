use std::collections::HashMap;
use async_trait::async_trait;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::patrons::domain::model::PatronEntity;
use crate::patrons::repository::PatronRepository;
use crate::utils::memory::{MemoryTable, with_branch};

#[derive(Debug)]
pub struct MemoryPatronRepository {
    table: MemoryTable,
    branch_id: String,
}

impl MemoryPatronRepository {
    pub(crate) fn new(table: MemoryTable, branch_id: &str) -> Self {
        Self {
            table,
            branch_id: branch_id.to_string(),
        }
    }
}

#[async_trait]
impl Repository<PatronEntity> for MemoryPatronRepository {
    async fn create(&self, entity: &PatronEntity) -> LibraryResult<usize> {
        self.table.put_new(entity)
    }

    async fn update(&self, entity: &PatronEntity) -> LibraryResult<usize> {
        self.table.put_versioned(entity)
    }

    async fn get(&self, id: &str) -> LibraryResult<PatronEntity> {
        self.table.get(id)
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.table.delete(id)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<PatronEntity>> {
        self.table.query(&with_branch(predicate, self.branch_id.as_str()), &["username"], page, page_size)
    }

    async fn count(&self, predicate: &HashMap<String, String>) -> LibraryResult<usize> {
        self.table.count(&with_branch(predicate, self.branch_id.as_str()))
    }
}

impl PatronRepository for MemoryPatronRepository {}

#[cfg(test)]
mod tests {
    use crate::core::library::LibraryError;
    use crate::core::repository::Repository;
    use crate::patrons::domain::model::PatronEntity;
    use crate::patrons::repository::memory_patron_repository::MemoryPatronRepository;
    use crate::patrons::repository::PatronRepository;
    use crate::utils::memory::MemoryTable;

    #[tokio::test]
    async fn test_should_find_patron_by_username() {
        let patrons_repo = MemoryPatronRepository::new(MemoryTable::new("patron_id"), "main");
        let patron = PatronEntity::new("main", "jdoe", "jdoe@example.com");
        patrons_repo.create(&patron).await.expect("should create patron");
        let found = patrons_repo.find_by_username("jdoe").await.expect("should query").expect("should find");
        assert_eq!(patron, found);
        assert_eq!(None, patrons_repo.find_by_username("nobody").await.expect("should query"));
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_patron() {
        let patrons_repo = MemoryPatronRepository::new(MemoryTable::new("patron_id"), "main");
        let patron = PatronEntity::new("main", "jdoe", "jdoe@example.com");
        patrons_repo.create(&patron).await.expect("should create patron");
        let err = patrons_repo.create(&patron).await.expect_err("should reject");
        assert!(matches!(err, LibraryError::DuplicateKey { .. }));
    }
}

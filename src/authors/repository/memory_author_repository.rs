use std::collections::HashMap;
use async_trait::async_trait;
use crate::authors::domain::model::AuthorEntity;
use crate::authors::repository::AuthorRepository;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::memory::{MemoryTable, with_branch};

#[derive(Debug)]
pub struct MemoryAuthorRepository {
    table: MemoryTable,
    branch_id: String,
}

impl MemoryAuthorRepository {
    pub(crate) fn new(table: MemoryTable, branch_id: &str) -> Self {
        Self {
            table,
            branch_id: branch_id.to_string(),
        }
    }
}

#[async_trait]
impl Repository<AuthorEntity> for MemoryAuthorRepository {
    async fn create(&self, entity: &AuthorEntity) -> LibraryResult<usize> {
        self.table.put_new(entity)
    }

    async fn update(&self, entity: &AuthorEntity) -> LibraryResult<usize> {
        self.table.put_versioned(entity)
    }

    async fn get(&self, id: &str) -> LibraryResult<AuthorEntity> {
        self.table.get(id)
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.table.delete(id)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<AuthorEntity>> {
        self.table.query(&with_branch(predicate, self.branch_id.as_str()), &["sort_name"], page, page_size)
    }

    async fn count(&self, predicate: &HashMap<String, String>) -> LibraryResult<usize> {
        self.table.count(&with_branch(predicate, self.branch_id.as_str()))
    }
}

impl AuthorRepository for MemoryAuthorRepository {}

#[cfg(test)]
mod tests {
    use crate::authors::domain::model::AuthorEntity;
    use crate::authors::repository::AuthorRepository;
    use crate::authors::repository::memory_author_repository::MemoryAuthorRepository;
    use crate::core::library::LibraryError;
    use crate::core::repository::Repository;
    use crate::utils::memory::MemoryTable;

    #[tokio::test]
    async fn test_should_list_authors_by_last_then_first_name() {
        let authors_repo = MemoryAuthorRepository::new(MemoryTable::new("author_id"), "main");
        for (first, last) in [("Zadie", "Smith"), ("Terry", "Pratchett"), ("Ali", "Smith")] {
            authors_repo.create(&AuthorEntity::new("main", first, last)).await.expect("should create author");
        }
        let res = authors_repo.list_by_name(None, 10).await.expect("should list authors");
        let names: Vec<String> = res.records.iter()
            .map(|a| format!("{} {}", a.first_name, a.last_name)).collect();
        assert_eq!(vec!["Terry Pratchett", "Ali Smith", "Zadie Smith"], names);
    }

    #[tokio::test]
    async fn test_should_delete_author() {
        let authors_repo = MemoryAuthorRepository::new(MemoryTable::new("author_id"), "main");
        let author = AuthorEntity::new("main", "Mary", "Shelley");
        authors_repo.create(&author).await.expect("should create author");
        assert_eq!(1, authors_repo.delete(author.author_id.as_str()).await.expect("should delete"));
        let err = authors_repo.get(author.author_id.as_str()).await.expect_err("should be gone");
        assert!(matches!(err, LibraryError::NotFound { .. }));
    }
}

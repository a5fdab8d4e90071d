use std::collections::HashMap;
use async_trait::async_trait;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::genres::domain::model::GenreEntity;
use crate::genres::repository::GenreRepository;
use crate::utils::memory::{MemoryTable, with_branch};

#[derive(Debug)]
pub struct MemoryGenreRepository {
    table: MemoryTable,
    branch_id: String,
}

impl MemoryGenreRepository {
    pub(crate) fn new(table: MemoryTable, branch_id: &str) -> Self {
        Self {
            table,
            branch_id: branch_id.to_string(),
        }
    }
}

#[async_trait]
impl Repository<GenreEntity> for MemoryGenreRepository {
    async fn create(&self, entity: &GenreEntity) -> LibraryResult<usize> {
        self.table.put_new(entity)
    }

    async fn update(&self, entity: &GenreEntity) -> LibraryResult<usize> {
        self.table.put_versioned(entity)
    }

    async fn get(&self, id: &str) -> LibraryResult<GenreEntity> {
        self.table.get(id)
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.table.delete(id)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<GenreEntity>> {
        self.table.query(&with_branch(predicate, self.branch_id.as_str()), &["name"], page, page_size)
    }

    async fn count(&self, predicate: &HashMap<String, String>) -> LibraryResult<usize> {
        self.table.count(&with_branch(predicate, self.branch_id.as_str()))
    }
}

impl GenreRepository for MemoryGenreRepository {}

#[cfg(test)]
mod tests {
    use crate::core::repository::Repository;
    use crate::genres::domain::model::GenreEntity;
    use crate::genres::repository::GenreRepository;
    use crate::genres::repository::memory_genre_repository::MemoryGenreRepository;
    use crate::utils::memory::MemoryTable;

    #[tokio::test]
    async fn test_should_list_genres_by_name_within_branch() {
        let table = MemoryTable::new("genre_id");
        let genres_repo = MemoryGenreRepository::new(table.clone(), "main");
        let other_branch = MemoryGenreRepository::new(table, "east");
        for name in ["Poetry", "Fantasy", "Horror"] {
            genres_repo.create(&GenreEntity::new("main", name)).await.expect("should create genre");
        }
        other_branch.create(&GenreEntity::new("east", "Drama")).await.expect("should create genre");

        let res = genres_repo.list_by_name(None, 10).await.expect("should list genres");
        let names: Vec<&str> = res.records.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(vec!["Fantasy", "Horror", "Poetry"], names);
        assert_eq!(1, other_branch.count(&Default::default()).await.expect("should count"));
    }

    #[tokio::test]
    async fn test_should_find_genres_by_ids_sorted() {
        let genres_repo = MemoryGenreRepository::new(MemoryTable::new("genre_id"), "main");
        let poetry = GenreEntity::new("main", "Poetry");
        let drama = GenreEntity::new("main", "Drama");
        genres_repo.create(&poetry).await.expect("should create genre");
        genres_repo.create(&drama).await.expect("should create genre");
        let ids = vec![poetry.genre_id.clone(), "missing".to_string(), drama.genre_id.clone()];
        let found = genres_repo.find_by_ids(&ids).await.expect("should find genres");
        assert_eq!(vec![drama, poetry], found);
    }
}

use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use crate::authors::domain::model::AuthorEntity;
use crate::authors::repository::{AUTHORS_KEY, AuthorRepository};
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::ddb::DDBTable;

// authors_ndx is keyed by (branch_id, sort_name)
#[derive(Debug)]
pub struct DDBAuthorRepository {
    table: DDBTable,
    index_name: String,
    branch_id: String,
}

impl DDBAuthorRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str, branch_id: &str) -> Self {
        Self {
            table: DDBTable::new(client, table_name, AUTHORS_KEY),
            index_name: index_name.to_string(),
            branch_id: branch_id.to_string(),
        }
    }
}

#[async_trait]
impl Repository<AuthorEntity> for DDBAuthorRepository {
    async fn create(&self, entity: &AuthorEntity) -> LibraryResult<usize> {
        self.table.put_new(entity).await
    }

    async fn update(&self, entity: &AuthorEntity) -> LibraryResult<usize> {
        self.table.put_versioned(entity).await
    }

    async fn get(&self, id: &str) -> LibraryResult<AuthorEntity> {
        self.table.get(id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.table.delete(id).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<AuthorEntity>> {
        self.table.query(self.index_name.as_str(), ("branch_id", self.branch_id.as_str()),
                         predicate, page, page_size).await
    }

    async fn count(&self, predicate: &HashMap<String, String>) -> LibraryResult<usize> {
        self.table.count(self.index_name.as_str(), ("branch_id", self.branch_id.as_str()), predicate).await
    }
}

impl AuthorRepository for DDBAuthorRepository {}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;
    use crate::authors::domain::model::AuthorEntity;
    use crate::authors::repository::AuthorRepository;
    use crate::authors::repository::ddb_author_repository::DDBAuthorRepository;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::utils::ddb::{build_db_client, create_table, delete_table, TableIndex};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "authors").await;
                let _ = create_table(&client, "authors", "author_id", &[
                    TableIndex { name: "authors_ndx", hash_key: "branch_id", range_key: "sort_name" },
                ]).await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB local on localhost:8000"]
    async fn test_should_create_update_authors() {
        let authors_repo = DDBAuthorRepository::new(CLIENT.get().await.clone(), "authors", "authors_ndx", "ddb-authors");
        let mut author = AuthorEntity::new("ddb-authors", "Frank", "Herbert");
        assert_eq!(1, authors_repo.create(&author).await.expect("should create author"));
        author.first_name = "Franklin".to_string();
        assert_eq!(1, authors_repo.update(&author).await.expect("should update author"));
        let loaded = authors_repo.get(author.author_id.as_str()).await.expect("should return author");
        assert_eq!("Franklin", loaded.first_name.as_str());
        assert_eq!(1, loaded.version);
        assert!(authors_repo.update(&author).await.is_err());
        let res = authors_repo.list_by_name(None, 10).await.expect("should list authors");
        assert_eq!(1, res.records.len());
    }
}

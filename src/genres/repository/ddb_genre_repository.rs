use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::genres::domain::model::GenreEntity;
use crate::genres::repository::{GENRES_KEY, GenreRepository};
use crate::utils::ddb::DDBTable;

// genres_ndx is keyed by (branch_id, name)
#[derive(Debug)]
pub struct DDBGenreRepository {
    table: DDBTable,
    index_name: String,
    branch_id: String,
}

impl DDBGenreRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str, branch_id: &str) -> Self {
        Self {
            table: DDBTable::new(client, table_name, GENRES_KEY),
            index_name: index_name.to_string(),
            branch_id: branch_id.to_string(),
        }
    }
}

#[async_trait]
impl Repository<GenreEntity> for DDBGenreRepository {
    async fn create(&self, entity: &GenreEntity) -> LibraryResult<usize> {
        self.table.put_new(entity).await
    }

    async fn update(&self, entity: &GenreEntity) -> LibraryResult<usize> {
        self.table.put_versioned(entity).await
    }

    async fn get(&self, id: &str) -> LibraryResult<GenreEntity> {
        self.table.get(id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.table.delete(id).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<GenreEntity>> {
        self.table.query(self.index_name.as_str(), ("branch_id", self.branch_id.as_str()),
                         predicate, page, page_size).await
    }

    async fn count(&self, predicate: &HashMap<String, String>) -> LibraryResult<usize> {
        self.table.count(self.index_name.as_str(), ("branch_id", self.branch_id.as_str()), predicate).await
    }
}

impl GenreRepository for DDBGenreRepository {}

use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::patrons::domain::model::PatronEntity;
use crate::patrons::repository::{PATRONS_KEY, PatronRepository};
use crate::utils::ddb::DDBTable;

// patrons_ndx is keyed by (branch_id, username) so username lookups hit the key condition
#[derive(Debug)]
pub struct DDBPatronRepository {
    table: DDBTable,
    index_name: String,
    branch_id: String,
}

impl DDBPatronRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str, branch_id: &str) -> Self {
        Self {
            table: DDBTable::new(client, table_name, PATRONS_KEY),
            index_name: index_name.to_string(),
            branch_id: branch_id.to_string(),
        }
    }
}

#[async_trait]
impl Repository<PatronEntity> for DDBPatronRepository {
    async fn create(&self, entity: &PatronEntity) -> LibraryResult<usize> {
        self.table.put_new(entity).await
    }

    async fn update(&self, entity: &PatronEntity) -> LibraryResult<usize> {
        self.table.put_versioned(entity).await
    }

    async fn get(&self, id: &str) -> LibraryResult<PatronEntity> {
        self.table.get(id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.table.delete(id).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<PatronEntity>> {
        self.table.query(self.index_name.as_str(), ("branch_id", self.branch_id.as_str()),
                         predicate, page, page_size).await
    }

    async fn count(&self, predicate: &HashMap<String, String>) -> LibraryResult<usize> {
        self.table.count(self.index_name.as_str(), ("branch_id", self.branch_id.as_str()), predicate).await
    }
}

#[async_trait]
impl PatronRepository for DDBPatronRepository {
    async fn find_by_username(&self, username: &str) -> LibraryResult<Option<PatronEntity>> {
        let res = self.table.query_range::<PatronEntity>(self.index_name.as_str(),
                                                         ("branch_id", self.branch_id.as_str()),
                                                         ("username", username)).await?;
        Ok(res.into_iter().next())
    }
}

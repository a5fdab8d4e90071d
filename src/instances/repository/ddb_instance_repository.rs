use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::instances::domain::model::BookInstanceEntity;
use crate::instances::repository::{BookInstanceRepository, INSTANCES_KEY};
use crate::utils::ddb::DDBTable;
use crate::utils::memory::with_branch;

#[derive(Debug)]
pub struct DDBBookInstanceRepository {
    table: DDBTable,
    status_index: String,
    created_index: String,
    branch_id: String,
}

impl DDBBookInstanceRepository {
    pub(crate) fn new(client: Client, table_name: &str, status_index: &str,
                      created_index: &str, branch_id: &str) -> Self {
        Self {
            table: DDBTable::new(client, table_name, INSTANCES_KEY),
            status_index: status_index.to_string(),
            created_index: created_index.to_string(),
            branch_id: branch_id.to_string(),
        }
    }

    // status listings run on the status index and filter on branch; everything else is
    // partitioned by branch in creation order
    fn index_for<'a>(&'a self, predicate: &'a HashMap<String, String>) -> (&'a str, (&'a str, &'a str)) {
        match predicate.get("loan_status") {
            Some(status) => {
                (self.status_index.as_str(), ("loan_status", status.as_str()))
            }
            None => (self.created_index.as_str(), ("branch_id", self.branch_id.as_str())),
        }
    }
}

#[async_trait]
impl Repository<BookInstanceEntity> for DDBBookInstanceRepository {
    async fn create(&self, entity: &BookInstanceEntity) -> LibraryResult<usize> {
        self.table.put_new(entity).await
    }

    async fn update(&self, entity: &BookInstanceEntity) -> LibraryResult<usize> {
        self.table.put_versioned(entity).await
    }

    async fn get(&self, id: &str) -> LibraryResult<BookInstanceEntity> {
        self.table.get(id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.table.delete(id).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookInstanceEntity>> {
        let scoped = with_branch(predicate, self.branch_id.as_str());
        let (index_name, hash_key) = self.index_for(&scoped);
        self.table.query(index_name, hash_key, &scoped, page, page_size).await
    }

    async fn count(&self, predicate: &HashMap<String, String>) -> LibraryResult<usize> {
        let scoped = with_branch(predicate, self.branch_id.as_str());
        let (index_name, hash_key) = self.index_for(&scoped);
        self.table.count(index_name, hash_key, &scoped).await
    }
}

impl BookInstanceRepository for DDBBookInstanceRepository {}

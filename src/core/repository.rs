use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::gateway::GatewayPublisherVia;

// Predicate keys are field names, optionally suffixed with a comparison, e.g. `due_back:<=`.
#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // updates an entity if its version still matches the stored one
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> LibraryResult<Entity>;

    // delete an entity
    async fn delete(&self, id: &str) -> LibraryResult<usize>;

    // filtered listing in the store's default order for the entity
    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Entity>>;

    // number of entities matching the predicate
    async fn count(&self, predicate: &HashMap::<String, String>) -> LibraryResult<usize>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    InMemory,
}

impl RepositoryStore {
    pub fn gateway_publisher(&self) -> GatewayPublisherVia {
        match self {
            RepositoryStore::DynamoDB => { GatewayPublisherVia::Sns }
            RepositoryStore::LocalDynamoDB => { GatewayPublisherVia::LocalDynamoDB }
            RepositoryStore::InMemory => { GatewayPublisherVia::Logs }
        }
    }
}

impl From<String> for RepositoryStore {
    fn from(s: String) -> Self {
        match s.as_str() {
            "DynamoDB" => RepositoryStore::DynamoDB,
            "LocalDynamoDB" => RepositoryStore::LocalDynamoDB,
            _ => RepositoryStore::InMemory,
        }
    }
}

impl Display for RepositoryStore {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RepositoryStore::DynamoDB => write!(f, "DynamoDB"),
            RepositoryStore::LocalDynamoDB => write!(f, "LocalDynamoDB"),
            RepositoryStore::InMemory => write!(f, "InMemory"),
        }
    }
}

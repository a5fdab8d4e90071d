use crate::authors::repository::{AUTHORS_INDEX, AUTHORS_KEY, AUTHORS_TABLE, AuthorRepository};
use crate::authors::repository::ddb_author_repository::DDBAuthorRepository;
use crate::authors::repository::memory_author_repository::MemoryAuthorRepository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table, TableIndex};
use crate::utils::memory::MemoryTable;

pub(crate) async fn create_author_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn AuthorRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBAuthorRepository::new(client, AUTHORS_TABLE, AUTHORS_INDEX, config.branch_id.as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, AUTHORS_TABLE, AUTHORS_KEY, &[
                TableIndex { name: AUTHORS_INDEX, hash_key: "branch_id", range_key: "sort_name" },
            ]).await;
            Box::new(DDBAuthorRepository::new(client, AUTHORS_TABLE, AUTHORS_INDEX, config.branch_id.as_str()))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryAuthorRepository::new(MemoryTable::shared(AUTHORS_TABLE, AUTHORS_KEY), config.branch_id.as_str()))
        }
    }
}

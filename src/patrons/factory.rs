use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::patrons::repository::{PATRONS_INDEX, PATRONS_KEY, PATRONS_TABLE, PatronRepository};
use crate::patrons::repository::ddb_patron_repository::DDBPatronRepository;
use crate::patrons::repository::memory_patron_repository::MemoryPatronRepository;
use crate::utils::ddb::{build_db_client, create_table, TableIndex};
use crate::utils::memory::MemoryTable;

pub(crate) async fn create_patron_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn PatronRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBPatronRepository::new(client, PATRONS_TABLE, PATRONS_INDEX, config.branch_id.as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, PATRONS_TABLE, PATRONS_KEY, &[
                TableIndex { name: PATRONS_INDEX, hash_key: "branch_id", range_key: "username" },
            ]).await;
            Box::new(DDBPatronRepository::new(client, PATRONS_TABLE, PATRONS_INDEX, config.branch_id.as_str()))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryPatronRepository::new(MemoryTable::shared(PATRONS_TABLE, PATRONS_KEY), config.branch_id.as_str()))
        }
    }
}

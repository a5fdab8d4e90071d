use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::instances::repository::{BookInstanceRepository, INSTANCES_CREATED_INDEX, INSTANCES_KEY, INSTANCES_STATUS_INDEX, INSTANCES_TABLE};
use crate::instances::repository::ddb_instance_repository::DDBBookInstanceRepository;
use crate::instances::repository::memory_instance_repository::MemoryBookInstanceRepository;
use crate::utils::ddb::{build_db_client, create_table, TableIndex};
use crate::utils::memory::MemoryTable;

pub(crate) async fn create_instance_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn BookInstanceRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBBookInstanceRepository::new(client, INSTANCES_TABLE, INSTANCES_STATUS_INDEX,
                                                    INSTANCES_CREATED_INDEX, config.branch_id.as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, INSTANCES_TABLE, INSTANCES_KEY, &[
                TableIndex { name: INSTANCES_STATUS_INDEX, hash_key: "loan_status", range_key: "due_sort" },
                TableIndex { name: INSTANCES_CREATED_INDEX, hash_key: "branch_id", range_key: "created_at" },
            ]).await;
            Box::new(DDBBookInstanceRepository::new(client, INSTANCES_TABLE, INSTANCES_STATUS_INDEX,
                                                    INSTANCES_CREATED_INDEX, config.branch_id.as_str()))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryBookInstanceRepository::new(MemoryTable::shared(INSTANCES_TABLE, INSTANCES_KEY),
                                                       config.branch_id.as_str()))
        }
    }
}

use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::genres::repository::{GENRES_INDEX, GENRES_KEY, GENRES_TABLE, GenreRepository};
use crate::genres::repository::ddb_genre_repository::DDBGenreRepository;
use crate::genres::repository::memory_genre_repository::MemoryGenreRepository;
use crate::utils::ddb::{build_db_client, create_table, TableIndex};
use crate::utils::memory::MemoryTable;

pub(crate) async fn create_genre_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn GenreRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBGenreRepository::new(client, GENRES_TABLE, GENRES_INDEX, config.branch_id.as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, GENRES_TABLE, GENRES_KEY, &[
                TableIndex { name: GENRES_INDEX, hash_key: "branch_id", range_key: "name" },
            ]).await;
            Box::new(DDBGenreRepository::new(client, GENRES_TABLE, GENRES_INDEX, config.branch_id.as_str()))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryGenreRepository::new(MemoryTable::shared(GENRES_TABLE, GENRES_KEY), config.branch_id.as_str()))
        }
    }
}

use crate::books::repository::{BOOKS_INDEX, BOOKS_KEY, BOOKS_TABLE, BookRepository};
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table, TableIndex};
use crate::utils::memory::MemoryTable;

pub(crate) async fn create_book_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn BookRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBBookRepository::new(client, BOOKS_TABLE, BOOKS_INDEX, config.branch_id.as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, BOOKS_TABLE, BOOKS_KEY, &[
                TableIndex { name: BOOKS_INDEX, hash_key: "branch_id", range_key: "title" },
            ]).await;
            Box::new(DDBBookRepository::new(client, BOOKS_TABLE, BOOKS_INDEX, config.branch_id.as_str()))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryBookRepository::new(MemoryTable::shared(BOOKS_TABLE, BOOKS_KEY), config.branch_id.as_str()))
        }
    }
}

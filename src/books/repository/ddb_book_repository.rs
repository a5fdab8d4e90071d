use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use crate::books::domain::model::BookEntity;
use crate::books::repository::{BOOKS_KEY, BookRepository};
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::ddb::DDBTable;

// books_ndx is keyed by (branch_id, title)
#[derive(Debug)]
pub struct DDBBookRepository {
    table: DDBTable,
    index_name: String,
    branch_id: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str, branch_id: &str) -> Self {
        Self {
            table: DDBTable::new(client, table_name, BOOKS_KEY),
            index_name: index_name.to_string(),
            branch_id: branch_id.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        self.table.put_new(entity).await
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        self.table.put_versioned(entity).await
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        self.table.get(id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.table.delete(id).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        self.table.query(self.index_name.as_str(), ("branch_id", self.branch_id.as_str()),
                         predicate, page, page_size).await
    }

    async fn count(&self, predicate: &HashMap<String, String>) -> LibraryResult<usize> {
        self.table.count(self.index_name.as_str(), ("branch_id", self.branch_id.as_str()), predicate).await
    }
}

impl BookRepository for DDBBookRepository {}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;

    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::ddb_book_repository::DDBBookRepository;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::utils::ddb::{build_db_client, create_table, delete_table, TableIndex};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "books").await;
                let _ = create_table(&client, "books", "book_id", &[
                    TableIndex { name: "books_ndx", hash_key: "branch_id", range_key: "title" },
                ]).await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB local on localhost:8000"]
    async fn test_should_create_get_books() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books", "books_ndx", "ddb-books");
        let book = BookEntity::new("ddb-books", "isbn", "test book");
        let size = books_repo.create(&book).await.expect("should create book");
        assert_eq!(1, size);

        let loaded = books_repo.get(book.book_id.as_str()).await.expect("should return book");
        assert_eq!(book.book_id, loaded.book_id);
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB local on localhost:8000"]
    async fn test_should_create_query_books() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books", "books_ndx", "ddb-books-query");
        for i in 0..30 {
            let mut book = BookEntity::new("ddb-books-query", format!("isbn{}", i).as_str(), format!("book {:02}", i).as_str());
            book.author_id = Some(if i % 3 == 0 { "a1" } else { "a2" }.to_string());
            books_repo.create(&book).await.expect("should create book");
        }
        let mut next_page = None;
        let mut titles = vec![];
        for _ in 0..10 {
            let res = books_repo.list_by_title(next_page.as_deref(), 10).await.expect("should return books");
            titles.extend(res.records.into_iter().map(|b| b.title));
            next_page = res.next_page;
            if next_page.is_none() {
                break;
            }
        }
        assert_eq!(30, titles.len());
        assert!(titles.windows(2).all(|w| w[0] <= w[1]));
        let found = books_repo.find_by_isbn("isbn17").await.expect("should query").expect("should find");
        assert_eq!("book 17", found.title.as_str());
        let by_author = std::collections::HashMap::from([("author_id".to_string(), "a1".to_string())]);
        assert_eq!(10, books_repo.count(&by_author).await.expect("should count"));
    }
}

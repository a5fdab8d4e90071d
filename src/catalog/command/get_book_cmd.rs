use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl GetBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) enum GetBookCommandRequest {
    ById(String),
    ByIsbn(String),
}

#[derive(Debug, Serialize)]
pub(crate) struct GetBookCommandResponse {
    pub book: BookDto,
}

#[async_trait]
impl Command<GetBookCommandRequest, GetBookCommandResponse> for GetBookCommand {
    async fn execute(&self, req: GetBookCommandRequest) -> Result<GetBookCommandResponse, CommandError> {
        let book = match req {
            GetBookCommandRequest::ById(book_id) => self.catalog_service.find_book_by_id(book_id.as_str()).await?,
            GetBookCommandRequest::ByIsbn(isbn) => self.catalog_service.find_book_by_isbn(isbn.as_str()).await?,
        };
        Ok(GetBookCommandResponse { book })
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::principal::Principal;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::Permission;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_get_book_by_id_or_isbn() {
        let config = Configuration::new("get-book-cmd");
        let added = AddBookCommand::new(factory::create_catalog_service(&config, RepositoryStore::InMemory).await)
            .execute(AddBookCommandRequest::new(Principal::user("librarian", &[Permission::CanMarkReturned]),
                                                "9780547928227", "The Hobbit"))
            .await.expect("should add book");
        let cmd = GetBookCommand::new(factory::create_catalog_service(&config, RepositoryStore::InMemory).await);

        let by_id = cmd.execute(GetBookCommandRequest::ById(added.book.book_id.clone())).await.expect("should find");
        let by_isbn = cmd.execute(GetBookCommandRequest::ByIsbn("9780547928227".to_string())).await.expect("should find");
        assert_eq!(by_id.book, by_isbn.book);

        let err = cmd.execute(GetBookCommandRequest::ByIsbn("0000000000".to_string())).await.expect_err("should miss");
        assert!(matches!(err, CommandError::NotFound { .. }));
    }
}

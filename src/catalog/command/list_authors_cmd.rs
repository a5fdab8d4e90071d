use async_trait::async_trait;
use serde::Serialize;
use crate::authors::dto::AuthorDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::PaginatedResult;

pub(crate) struct ListAuthorsCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl ListAuthorsCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ListAuthorsCommandRequest {
    pub(crate) page: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListAuthorsCommandResponse {
    pub authors: PaginatedResult<AuthorDto>,
}

#[async_trait]
impl Command<ListAuthorsCommandRequest, ListAuthorsCommandResponse> for ListAuthorsCommand {
    async fn execute(&self, req: ListAuthorsCommandRequest) -> Result<ListAuthorsCommandResponse, CommandError> {
        let authors = self.catalog_service.list_authors(req.page.as_deref()).await?;
        Ok(ListAuthorsCommandResponse { authors })
    }
}

use async_trait::async_trait;
use serde::Serialize;
use crate::auth::principal::Principal;
use crate::catalog::command::require_librarian;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct RemoveBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl RemoveBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct RemoveBookCommandRequest {
    pub(crate) principal: Principal,
    pub(crate) book_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveBookCommandResponse {
    pub book_id: String,
}

#[async_trait]
impl Command<RemoveBookCommandRequest, RemoveBookCommandResponse> for RemoveBookCommand {
    async fn execute(&self, req: RemoveBookCommandRequest) -> Result<RemoveBookCommandResponse, CommandError> {
        require_librarian(&req.principal)?;
        self.catalog_service.remove_book(req.book_id.as_str()).await?;
        Ok(RemoveBookCommandResponse { book_id: req.book_id })
    }
}

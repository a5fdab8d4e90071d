use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::auth::principal::Principal;
use crate::books::dto::BookDto;
use crate::catalog::command::require_librarian;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpdateBookCommandRequest {
    pub(crate) principal: Principal,
    pub(crate) book: BookDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct UpdateBookCommandResponse {
    pub book: BookDto,
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        require_librarian(&req.principal)?;
        let book = self.catalog_service.update_book(&req.book).await?;
        Ok(UpdateBookCommandResponse { book })
    }
}

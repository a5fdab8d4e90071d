use async_trait::async_trait;
use serde::Serialize;
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::BookDetailDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct BookDetailCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl BookDetailCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct BookDetailCommandRequest {
    pub(crate) book_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct BookDetailCommandResponse {
    pub detail: BookDetailDto,
}

#[async_trait]
impl Command<BookDetailCommandRequest, BookDetailCommandResponse> for BookDetailCommand {
    async fn execute(&self, req: BookDetailCommandRequest) -> Result<BookDetailCommandResponse, CommandError> {
        let detail = self.catalog_service.book_detail(req.book_id.as_str()).await?;
        Ok(BookDetailCommandResponse { detail })
    }
}

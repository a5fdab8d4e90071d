use async_trait::async_trait;
use serde::Serialize;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::PaginatedResult;
use crate::genres::dto::GenreDto;

pub(crate) struct ListGenresCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl ListGenresCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ListGenresCommandRequest {
    pub(crate) page: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListGenresCommandResponse {
    pub genres: PaginatedResult<GenreDto>,
}

#[async_trait]
impl Command<ListGenresCommandRequest, ListGenresCommandResponse> for ListGenresCommand {
    async fn execute(&self, req: ListGenresCommandRequest) -> Result<ListGenresCommandResponse, CommandError> {
        let genres = self.catalog_service.list_genres(req.page.as_deref()).await?;
        Ok(ListGenresCommandResponse { genres })
    }
}

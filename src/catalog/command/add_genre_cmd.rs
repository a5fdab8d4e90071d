use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::auth::principal::Principal;
use crate::catalog::command::require_librarian;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::genres::dto::GenreDto;

pub(crate) struct AddGenreCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddGenreCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddGenreCommandRequest {
    #[serde(skip)]
    pub(crate) principal: Principal,
    pub(crate) name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddGenreCommandResponse {
    pub genre: GenreDto,
}

#[async_trait]
impl Command<AddGenreCommandRequest, AddGenreCommandResponse> for AddGenreCommand {
    async fn execute(&self, req: AddGenreCommandRequest) -> Result<AddGenreCommandResponse, CommandError> {
        require_librarian(&req.principal)?;
        let genre = self.catalog_service.add_genre(&GenreDto::new("", req.name.as_str())).await?;
        Ok(AddGenreCommandResponse { genre })
    }
}

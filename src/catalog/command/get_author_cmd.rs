use async_trait::async_trait;
use serde::Serialize;
use crate::authors::dto::AuthorDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetAuthorCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl GetAuthorCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct GetAuthorCommandRequest {
    pub(crate) author_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetAuthorCommandResponse {
    pub author: AuthorDto,
}

#[async_trait]
impl Command<GetAuthorCommandRequest, GetAuthorCommandResponse> for GetAuthorCommand {
    async fn execute(&self, req: GetAuthorCommandRequest) -> Result<GetAuthorCommandResponse, CommandError> {
        let author = self.catalog_service.find_author_by_id(req.author_id.as_str()).await?;
        Ok(GetAuthorCommandResponse { author })
    }
}

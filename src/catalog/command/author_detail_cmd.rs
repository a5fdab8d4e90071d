use async_trait::async_trait;
use serde::Serialize;
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::AuthorDetailDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct AuthorDetailCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AuthorDetailCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct AuthorDetailCommandRequest {
    pub(crate) author_id: String,
    pub(crate) page: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AuthorDetailCommandResponse {
    pub detail: AuthorDetailDto,
}

#[async_trait]
impl Command<AuthorDetailCommandRequest, AuthorDetailCommandResponse> for AuthorDetailCommand {
    async fn execute(&self, req: AuthorDetailCommandRequest) -> Result<AuthorDetailCommandResponse, CommandError> {
        let detail = self.catalog_service.author_detail(req.author_id.as_str(), req.page.as_deref()).await?;
        Ok(AuthorDetailCommandResponse { detail })
    }
}

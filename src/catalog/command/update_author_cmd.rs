use async_trait::async_trait;
use serde::Serialize;
use crate::auth::principal::Principal;
use crate::authors::dto::AuthorDto;
use crate::catalog::command::require_librarian;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateAuthorCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl UpdateAuthorCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpdateAuthorCommandRequest {
    pub(crate) principal: Principal,
    pub(crate) author: AuthorDto,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateAuthorCommandResponse {
    pub author: AuthorDto,
}

#[async_trait]
impl Command<UpdateAuthorCommandRequest, UpdateAuthorCommandResponse> for UpdateAuthorCommand {
    async fn execute(&self, req: UpdateAuthorCommandRequest) -> Result<UpdateAuthorCommandResponse, CommandError> {
        require_librarian(&req.principal)?;
        let author = self.catalog_service.update_author(&req.author).await?;
        Ok(UpdateAuthorCommandResponse { author })
    }
}

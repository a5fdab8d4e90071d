use async_trait::async_trait;
use serde::Serialize;
use crate::auth::principal::Principal;
use crate::catalog::command::require_librarian;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct RemoveAuthorCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl RemoveAuthorCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct RemoveAuthorCommandRequest {
    pub(crate) principal: Principal,
    pub(crate) author_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveAuthorCommandResponse {
    pub author_id: String,
}

#[async_trait]
impl Command<RemoveAuthorCommandRequest, RemoveAuthorCommandResponse> for RemoveAuthorCommand {
    async fn execute(&self, req: RemoveAuthorCommandRequest) -> Result<RemoveAuthorCommandResponse, CommandError> {
        require_librarian(&req.principal)?;
        self.catalog_service.remove_author(req.author_id.as_str()).await?;
        Ok(RemoveAuthorCommandResponse { author_id: req.author_id })
    }
}

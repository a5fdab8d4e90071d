use async_trait::async_trait;
use serde::Serialize;
use crate::auth::principal::Principal;
use crate::catalog::command::require_librarian;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::instances::dto::BookInstanceDto;

pub(crate) struct UpdateInstanceCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl UpdateInstanceCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpdateInstanceCommandRequest {
    pub(crate) principal: Principal,
    pub(crate) instance: BookInstanceDto,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateInstanceCommandResponse {
    pub instance: BookInstanceDto,
}

#[async_trait]
impl Command<UpdateInstanceCommandRequest, UpdateInstanceCommandResponse> for UpdateInstanceCommand {
    async fn execute(&self, req: UpdateInstanceCommandRequest) -> Result<UpdateInstanceCommandResponse, CommandError> {
        require_librarian(&req.principal)?;
        let instance = self.catalog_service.update_instance(&req.instance).await?;
        Ok(UpdateInstanceCommandResponse { instance })
    }
}

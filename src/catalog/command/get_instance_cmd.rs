use async_trait::async_trait;
use serde::Serialize;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::instances::dto::BookInstanceDto;

pub(crate) struct GetInstanceCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl GetInstanceCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct GetInstanceCommandRequest {
    pub(crate) instance_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetInstanceCommandResponse {
    pub instance: BookInstanceDto,
}

#[async_trait]
impl Command<GetInstanceCommandRequest, GetInstanceCommandResponse> for GetInstanceCommand {
    async fn execute(&self, req: GetInstanceCommandRequest) -> Result<GetInstanceCommandResponse, CommandError> {
        let instance = self.catalog_service.find_instance_by_id(req.instance_id.as_str()).await?;
        Ok(GetInstanceCommandResponse { instance })
    }
}

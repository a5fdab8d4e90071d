use async_trait::async_trait;
use serde::Serialize;
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::CatalogSummary;
use crate::core::command::{Command, CommandError};

pub(crate) struct CatalogSummaryCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl CatalogSummaryCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct CatalogSummaryCommandRequest {}

#[derive(Debug, Serialize)]
pub(crate) struct CatalogSummaryCommandResponse {
    pub summary: CatalogSummary,
}

#[async_trait]
impl Command<CatalogSummaryCommandRequest, CatalogSummaryCommandResponse> for CatalogSummaryCommand {
    async fn execute(&self, _req: CatalogSummaryCommandRequest) -> Result<CatalogSummaryCommandResponse, CommandError> {
        let summary = self.catalog_service.summary().await?;
        Ok(CatalogSummaryCommandResponse { summary })
    }
}

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::auth::principal::Principal;
use crate::catalog::command::require_librarian;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::LoanStatus;
use crate::instances::dto::BookInstanceDto;

pub(crate) struct AddInstanceCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddInstanceCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddInstanceCommandRequest {
    #[serde(skip)]
    pub(crate) principal: Principal,
    pub(crate) book_id: String,
    pub(crate) imprint: String,
    #[serde(default)]
    pub(crate) loan_status: LoanStatus,
    #[serde(default)]
    pub(crate) due_back: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) borrower_id: Option<String>,
}

impl AddInstanceCommandRequest {
    pub fn build_instance(&self) -> BookInstanceDto {
        let mut instance = BookInstanceDto::new("", self.book_id.as_str(), self.imprint.as_str());
        instance.loan_status = self.loan_status;
        instance.due_back = self.due_back;
        instance.borrower_id = self.borrower_id.clone();
        instance
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddInstanceCommandResponse {
    pub instance: BookInstanceDto,
}

#[async_trait]
impl Command<AddInstanceCommandRequest, AddInstanceCommandResponse> for AddInstanceCommand {
    async fn execute(&self, req: AddInstanceCommandRequest) -> Result<AddInstanceCommandResponse, CommandError> {
        require_librarian(&req.principal)?;
        let instance = self.catalog_service.add_instance(&req.build_instance()).await?;
        Ok(AddInstanceCommandResponse { instance })
    }
}

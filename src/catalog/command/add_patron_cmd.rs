use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::auth::principal::Principal;
use crate::catalog::command::require_librarian;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::Permission;
use crate::patrons::dto::PatronDto;

pub(crate) struct AddPatronCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddPatronCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddPatronCommandRequest {
    #[serde(skip)]
    pub(crate) principal: Principal,
    pub(crate) username: String,
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) first_name: String,
    #[serde(default)]
    pub(crate) last_name: String,
    #[serde(default)]
    pub(crate) permissions: Vec<Permission>,
}

impl AddPatronCommandRequest {
    pub fn build_patron(&self) -> PatronDto {
        let mut patron = PatronDto::new("", self.username.as_str(), self.email.as_str());
        patron.first_name = self.first_name.to_string();
        patron.last_name = self.last_name.to_string();
        patron.permissions = self.permissions.clone();
        patron
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddPatronCommandResponse {
    pub patron: PatronDto,
}

#[async_trait]
impl Command<AddPatronCommandRequest, AddPatronCommandResponse> for AddPatronCommand {
    async fn execute(&self, req: AddPatronCommandRequest) -> Result<AddPatronCommandResponse, CommandError> {
        require_librarian(&req.principal)?;
        let patron = self.catalog_service.add_patron(&req.build_patron()).await?;
        Ok(AddPatronCommandResponse { patron })
    }
}

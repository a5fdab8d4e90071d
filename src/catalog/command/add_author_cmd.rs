use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::auth::principal::Principal;
use crate::authors::dto::AuthorDto;
use crate::catalog::command::require_librarian;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddAuthorCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddAuthorCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddAuthorCommandRequest {
    #[serde(skip)]
    pub(crate) principal: Principal,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    #[serde(default)]
    pub(crate) date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) date_of_death: Option<NaiveDate>,
}

impl AddAuthorCommandRequest {
    pub fn build_author(&self) -> AuthorDto {
        let mut author = AuthorDto::new("", self.first_name.as_str(), self.last_name.as_str());
        author.date_of_birth = self.date_of_birth;
        author.date_of_death = self.date_of_death;
        author
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddAuthorCommandResponse {
    pub author: AuthorDto,
}

#[async_trait]
impl Command<AddAuthorCommandRequest, AddAuthorCommandResponse> for AddAuthorCommand {
    async fn execute(&self, req: AddAuthorCommandRequest) -> Result<AddAuthorCommandResponse, CommandError> {
        require_librarian(&req.principal)?;
        let author = self.catalog_service.add_author(&req.build_author()).await?;
        Ok(AddAuthorCommandResponse { author })
    }
}

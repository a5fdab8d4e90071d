use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::auth::principal::Principal;
use crate::books::dto::BookDto;
use crate::catalog::command::require_librarian;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    #[serde(skip)]
    pub(crate) principal: Principal,
    pub(crate) isbn: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) author_id: Option<String>,
    #[serde(default)]
    pub(crate) summary: String,
    #[serde(default)]
    pub(crate) genre_ids: Vec<String>,
}

impl AddBookCommandRequest {
    pub fn new(principal: Principal, isbn: &str, title: &str) -> Self {
        Self {
            principal,
            isbn: isbn.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn build_book(&self, branch_id: &str) -> BookDto {
        let mut book = BookDto::new(branch_id, self.isbn.as_str(), self.title.as_str());
        book.author_id = self.author_id.clone();
        book.summary = self.summary.to_string();
        book.genre_ids = self.genre_ids.clone();
        book
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    pub book: BookDto,
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        require_librarian(&req.principal)?;
        // the service stamps the configured branch
        let book = self.catalog_service.add_book(&req.build_book("")).await?;
        Ok(AddBookCommandResponse { book })
    }
}

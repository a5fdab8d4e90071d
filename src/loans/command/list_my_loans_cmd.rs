use async_trait::async_trait;
use serde::Serialize;
use crate::auth::guard::{authorize, LoginRequired};
use crate::auth::principal::Principal;
use crate::core::command::{Command, CommandError};
use crate::core::library::{LibraryError, PaginatedResult};
use crate::instances::dto::BookInstanceDto;
use crate::loans::domain::LoanService;

pub(crate) struct ListMyLoansCommand {
    loan_service: Box<dyn LoanService>,
    page_size: usize,
}

impl ListMyLoansCommand {
    pub(crate) fn new(loan_service: Box<dyn LoanService>, page_size: usize) -> Self {
        Self {
            loan_service,
            page_size,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ListMyLoansCommandRequest {
    pub(crate) principal: Principal,
    pub(crate) page: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListMyLoansCommandResponse {
    pub loans: PaginatedResult<BookInstanceDto>,
}

#[async_trait]
impl Command<ListMyLoansCommandRequest, ListMyLoansCommandResponse> for ListMyLoansCommand {
    async fn execute(&self, req: ListMyLoansCommandRequest) -> Result<ListMyLoansCommandResponse, CommandError> {
        authorize(&req.principal, &[&LoginRequired])?;
        let borrower_id = req.principal.user_id.as_deref()
            .ok_or_else(|| LibraryError::access_denied("login required", Some("401".to_string())))?;
        let loans = self.loan_service.list_on_loan_for_borrower(
            borrower_id, req.page.as_deref(), self.page_size).await?;
        Ok(ListMyLoansCommandResponse { loans })
    }
}

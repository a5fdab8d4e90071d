use async_trait::async_trait;
use serde::Serialize;
use crate::auth::guard::{authorize, LoginRequired, PermissionRequired};
use crate::auth::principal::Principal;
use crate::core::command::{Command, CommandError};
use crate::core::library::{PaginatedResult, Permission};
use crate::loans::domain::LoanService;
use crate::loans::dto::LoanDto;

pub(crate) struct ListAllLoansCommand {
    loan_service: Box<dyn LoanService>,
    page_size: usize,
}

impl ListAllLoansCommand {
    pub(crate) fn new(loan_service: Box<dyn LoanService>, page_size: usize) -> Self {
        Self {
            loan_service,
            page_size,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ListAllLoansCommandRequest {
    pub(crate) principal: Principal,
    pub(crate) page: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListAllLoansCommandResponse {
    pub loans: PaginatedResult<LoanDto>,
}

#[async_trait]
impl Command<ListAllLoansCommandRequest, ListAllLoansCommandResponse> for ListAllLoansCommand {
    async fn execute(&self, req: ListAllLoansCommandRequest) -> Result<ListAllLoansCommandResponse, CommandError> {
        authorize(&req.principal, &[&LoginRequired, &PermissionRequired(Permission::CanMarkReturned)])?;
        let loans = self.loan_service.list_all_on_loan(req.page.as_deref(), self.page_size).await?;
        Ok(ListAllLoansCommandResponse { loans })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::auth::principal::Principal;
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    use crate::core::command::{Command, CommandError};
    use crate::core::library::{LoanStatus, Permission};
    use crate::core::repository::Repository;
    use crate::instances::domain::model::BookInstanceEntity;
    use crate::instances::repository::memory_instance_repository::MemoryBookInstanceRepository;
    use crate::loans::command::list_all_loans_cmd::{ListAllLoansCommand, ListAllLoansCommandRequest};
    use crate::loans::domain::service::LoanServiceImpl;
    use crate::patrons::repository::memory_patron_repository::MemoryPatronRepository;
    use crate::utils::memory::MemoryTable;

    #[tokio::test]
    async fn test_should_require_permission_to_list_all_loans() {
        let instances = MemoryBookInstanceRepository::new(MemoryTable::new("instance_id"), "main");
        let books = MemoryBookRepository::new(MemoryTable::new("book_id"), "main");
        let book = BookEntity::new("main", "9780441013593", "Dune");
        books.create(&book).await.expect("should create book");
        let mut instance = BookInstanceEntity::new("main", book.book_id.as_str(), "Ace");
        instance.loan_status = LoanStatus::OnLoan;
        instance.borrower_id = Some("gone".to_string());
        instance.set_due_back(NaiveDate::from_ymd_opt(2024, 1, 5));
        instances.create(&instance).await.expect("should create instance");
        let svc = LoanServiceImpl::new(Box::new(instances), Box::new(books),
                                       Box::new(MemoryPatronRepository::new(MemoryTable::new("patron_id"), "main")));
        let cmd = ListAllLoansCommand::new(Box::new(svc), 5);

        let err = cmd.execute(ListAllLoansCommandRequest { principal: Principal::user("bob", &[]), page: None })
            .await.expect_err("should refuse");
        assert!(matches!(err, CommandError::Forbidden { .. }));

        let res = cmd.execute(ListAllLoansCommandRequest {
            principal: Principal::user("librarian", &[Permission::CanMarkReturned]),
            page: None,
        }).await.expect("should list");
        assert_eq!(1, res.loans.records.len());
        assert_eq!("Dune", res.loans.records[0].book_title.as_str());
        // unknown borrowers are shown without details
        assert_eq!(None, res.loans.records[0].borrower);
    }
}

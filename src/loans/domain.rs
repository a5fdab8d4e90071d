use async_trait::async_trait;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::instances::dto::BookInstanceDto;
use crate::loans::dto::LoanDto;

pub mod service;

// Every listing is one page per call; pass next_page back to continue.
#[async_trait]
pub(crate) trait LoanService: Sync + Send {
    async fn list_all_ordered_by_creation(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookInstanceDto>>;

    // on loan to the borrower, earliest due first and undated copies before those
    async fn list_on_loan_for_borrower(&self, borrower_id: &str,
                                       page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookInstanceDto>>;

    async fn list_all_on_loan(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<LoanDto>>;

    // all copies of a book in creation order
    async fn list_instances_for_book(&self, book_id: &str) -> LibraryResult<Vec<BookInstanceDto>>;
}

pub mod ddb_instance_repository;
pub mod memory_instance_repository;

use std::collections::HashMap;
use async_trait::async_trait;
use crate::core::library::{LibraryResult, LoanStatus, PaginatedResult};
use crate::core::repository::Repository;
use crate::instances::domain::model::BookInstanceEntity;

pub(crate) const INSTANCES_TABLE: &str = "instances";
pub(crate) const INSTANCES_KEY: &str = "instance_id";
// (loan_status, due_sort)
pub(crate) const INSTANCES_STATUS_INDEX: &str = "instances_ndx";
// (branch_id, created_at)
pub(crate) const INSTANCES_CREATED_INDEX: &str = "instances_created_ndx";

// Listings constrained by loan_status come back in due date order, with copies that
// have no due date first; all other listings come back in creation order.
#[async_trait]
pub(crate) trait BookInstanceRepository: Repository<BookInstanceEntity> {
    async fn query_by_status(&self, status: LoanStatus, borrower_id: Option<&str>,
                             page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookInstanceEntity>> {
        let mut predicate = HashMap::from([("loan_status".to_string(), status.to_string())]);
        if let Some(borrower_id) = borrower_id {
            predicate.insert("borrower_id".to_string(), borrower_id.to_string());
        }
        self.query(&predicate, page, page_size).await
    }

    async fn list_by_creation(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookInstanceEntity>> {
        self.query(&HashMap::new(), page, page_size).await
    }

    async fn find_by_book_id(&self, book_id: &str,
                             page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookInstanceEntity>> {
        self.query(&HashMap::from([("book_id".to_string(), book_id.to_string())]), page, page_size).await
    }

    // every copy of a book, following next_page to the end
    async fn list_all_for_book(&self, book_id: &str) -> LibraryResult<Vec<BookInstanceEntity>> {
        let mut instances = vec![];
        let mut page: Option<String> = None;
        loop {
            let res = self.find_by_book_id(book_id, page.as_deref(), 100).await?;
            instances.extend(res.records);
            match res.next_page {
                Some(next) => page = Some(next),
                None => return Ok(instances),
            }
        }
    }
}

pub(crate) fn is_status_query(predicate: &HashMap<String, String>) -> bool {
    predicate.contains_key("loan_status")
}

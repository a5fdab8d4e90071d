use std::collections::HashMap;
use async_trait::async_trait;
use tracing::debug;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult, LoanStatus, PaginatedResult};
use crate::instances::dto::BookInstanceDto;
use crate::instances::repository::BookInstanceRepository;
use crate::loans::domain::LoanService;
use crate::loans::dto::{BorrowerDto, LoanDto};
use crate::patrons::dto::PatronDto;
use crate::patrons::repository::PatronRepository;

pub(crate) struct LoanServiceImpl {
    instance_repository: Box<dyn BookInstanceRepository>,
    book_repository: Box<dyn BookRepository>,
    patron_repository: Box<dyn PatronRepository>,
}

impl LoanServiceImpl {
    pub(crate) fn new(instance_repository: Box<dyn BookInstanceRepository>,
                      book_repository: Box<dyn BookRepository>,
                      patron_repository: Box<dyn PatronRepository>) -> Self {
        Self {
            instance_repository,
            book_repository,
            patron_repository,
        }
    }

    async fn book_title(&self, book_id: &str) -> LibraryResult<String> {
        match self.book_repository.get(book_id).await {
            Ok(book) => Ok(book.title),
            Err(LibraryError::NotFound { .. }) => Ok(String::new()),
            Err(err) => Err(err),
        }
    }

    async fn borrower(&self, patron_id: &str) -> LibraryResult<Option<BorrowerDto>> {
        match self.patron_repository.get(patron_id).await {
            Ok(patron) => Ok(Some(BorrowerDto::from(&PatronDto::from(&patron)))),
            Err(LibraryError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl LoanService for LoanServiceImpl {
    async fn list_all_ordered_by_creation(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookInstanceDto>> {
        let res = self.instance_repository.list_by_creation(page, page_size).await?;
        Ok(res.map(BookInstanceDto::from))
    }

    async fn list_on_loan_for_borrower(&self, borrower_id: &str,
                                       page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookInstanceDto>> {
        debug!(borrower_id, "listing loans of borrower");
        let res = self.instance_repository.query_by_status(
            LoanStatus::OnLoan, Some(borrower_id), page, page_size).await?;
        Ok(res.map(BookInstanceDto::from))
    }

    async fn list_all_on_loan(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<LoanDto>> {
        let res = self.instance_repository.query_by_status(LoanStatus::OnLoan, None, page, page_size).await?;
        // each book and borrower is fetched once per page
        let mut titles: HashMap<String, String> = HashMap::new();
        let mut borrowers: HashMap<String, Option<BorrowerDto>> = HashMap::new();
        let mut loans = Vec::with_capacity(res.records.len());
        for instance in &res.records {
            if !titles.contains_key(&instance.book_id) {
                let title = self.book_title(instance.book_id.as_str()).await?;
                titles.insert(instance.book_id.clone(), title);
            }
            let borrower = match &instance.borrower_id {
                Some(patron_id) => {
                    if !borrowers.contains_key(patron_id) {
                        let found = self.borrower(patron_id.as_str()).await?;
                        borrowers.insert(patron_id.clone(), found);
                    }
                    borrowers.get(patron_id).cloned().flatten()
                }
                None => None,
            };
            let instance = BookInstanceDto::from(instance);
            let book_title = titles.get(&instance.book_id).cloned().unwrap_or_default();
            loans.push(LoanDto {
                display: instance.display_with(book_title.as_str()),
                instance,
                book_title,
                borrower,
            });
        }
        Ok(PaginatedResult::new(res.page.as_deref(), res.page_size, res.next_page.clone(), loans))
    }

    async fn list_instances_for_book(&self, book_id: &str) -> LibraryResult<Vec<BookInstanceDto>> {
        let instances = self.instance_repository.list_all_for_book(book_id).await?;
        Ok(instances.iter().map(BookInstanceDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    use crate::core::library::LoanStatus;
    use crate::core::repository::Repository;
    use crate::instances::domain::model::BookInstanceEntity;
    use crate::instances::repository::memory_instance_repository::MemoryBookInstanceRepository;
    use crate::loans::domain::LoanService;
    use crate::loans::domain::service::LoanServiceImpl;
    use crate::patrons::domain::model::PatronEntity;
    use crate::patrons::repository::memory_patron_repository::MemoryPatronRepository;
    use crate::utils::memory::MemoryTable;

    struct Fixture {
        svc: LoanServiceImpl,
        book_id: String,
        alice: String,
        bob: String,
    }

    // three loans for alice, one for bob, one available copy and one copy of another book
    async fn fixture() -> Fixture {
        let instances = MemoryBookInstanceRepository::new(MemoryTable::new("instance_id"), "main");
        let books = MemoryBookRepository::new(MemoryTable::new("book_id"), "main");
        let patrons = MemoryPatronRepository::new(MemoryTable::new("patron_id"), "main");
        let dune = BookEntity::new("main", "9780441013593", "Dune");
        let emma = BookEntity::new("main", "9780141439587", "Emma");
        books.create(&dune).await.unwrap();
        books.create(&emma).await.unwrap();
        let mut alice = PatronEntity::new("main", "alice", "alice@example.com");
        alice.first_name = "Alice".to_string();
        alice.last_name = "Liddell".to_string();
        let bob = PatronEntity::new("main", "bob", "bob@example.com");
        patrons.create(&alice).await.unwrap();
        patrons.create(&bob).await.unwrap();

        let jan = |d| NaiveDate::from_ymd_opt(2024, 1, d);
        for (borrower, due) in [(&alice, jan(20)), (&bob, jan(2)), (&alice, None), (&alice, jan(10))] {
            let mut instance = BookInstanceEntity::new("main", dune.book_id.as_str(), "Ace");
            instance.loan_status = LoanStatus::OnLoan;
            instance.borrower_id = Some(borrower.patron_id.clone());
            instance.set_due_back(due);
            instances.create(&instance).await.unwrap();
        }
        let mut available = BookInstanceEntity::new("main", dune.book_id.as_str(), "Ace");
        available.loan_status = LoanStatus::Available;
        instances.create(&available).await.unwrap();
        instances.create(&BookInstanceEntity::new("main", emma.book_id.as_str(), "Penguin")).await.unwrap();

        Fixture {
            svc: LoanServiceImpl::new(Box::new(instances), Box::new(books), Box::new(patrons)),
            book_id: dune.book_id,
            alice: alice.patron_id,
            bob: bob.patron_id,
        }
    }

    #[tokio::test]
    async fn test_should_list_only_on_loan_with_borrowers() {
        let f = fixture().await;
        let res = f.svc.list_all_on_loan(None, 10).await.expect("should list");
        assert_eq!(4, res.records.len());
        assert!(res.records.iter().all(|l| l.instance.loan_status == LoanStatus::OnLoan));
        assert!(res.records.iter().all(|l| l.book_title == "Dune"));
        assert!(res.records.iter().all(|l| l.display == format!("{} (Dune)", l.instance.instance_id)));
        let first = &res.records[0];
        assert_eq!(None, first.instance.due_back);
        assert_eq!("Alice Liddell", first.borrower.as_ref().expect("borrower").display_name.as_str());
        assert_eq!(Some(f.bob.as_str()), res.records[1].borrower.as_ref().map(|b| b.patron_id.as_str()));
    }

    #[tokio::test]
    async fn test_should_list_borrower_loans_by_due_date() {
        let f = fixture().await;
        let mine = f.svc.list_on_loan_for_borrower(f.alice.as_str(), None, 10).await.expect("should list");
        let dues: Vec<Option<NaiveDate>> = mine.records.iter().map(|i| i.due_back).collect();
        assert_eq!(vec![None, NaiveDate::from_ymd_opt(2024, 1, 10), NaiveDate::from_ymd_opt(2024, 1, 20)], dues);

        let all = f.svc.list_all_on_loan(None, 10).await.expect("should list");
        let alices: Vec<String> = all.records.iter()
            .filter(|l| l.instance.borrower_id.as_deref() == Some(f.alice.as_str()))
            .map(|l| l.instance.instance_id.clone()).collect();
        let ids: Vec<String> = mine.records.iter().map(|i| i.instance_id.clone()).collect();
        assert_eq!(alices, ids);
    }

    #[tokio::test]
    async fn test_should_page_through_all_instances() {
        let f = fixture().await;
        let mut page = None;
        let mut seen = 0;
        loop {
            let res = f.svc.list_all_ordered_by_creation(page.as_deref(), 4).await.expect("should list");
            seen += res.records.len();
            match res.next_page {
                Some(next) => page = Some(next),
                None => break,
            }
        }
        assert_eq!(6, seen);
        assert_eq!(5, f.svc.list_instances_for_book(f.book_id.as_str()).await.expect("should list").len());
    }
}

use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::core::library::PaginatedResult;
use crate::instances::dto::BookInstanceDto;
use crate::loans::domain::LoanService;

pub(crate) struct ListInstancesCommand {
    loan_service: Box<dyn LoanService>,
    page_size: usize,
}

impl ListInstancesCommand {
    pub(crate) fn new(loan_service: Box<dyn LoanService>, page_size: usize) -> Self {
        Self {
            loan_service,
            page_size,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ListInstancesCommandRequest {
    pub(crate) page: Option<String>,
    // restricts the listing to the copies of one book
    pub(crate) book_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListInstancesCommandResponse {
    pub instances: PaginatedResult<BookInstanceDto>,
}

#[async_trait]
impl Command<ListInstancesCommandRequest, ListInstancesCommandResponse> for ListInstancesCommand {
    async fn execute(&self, req: ListInstancesCommandRequest) -> Result<ListInstancesCommandResponse, CommandError> {
        let instances = match req.book_id {
            Some(book_id) => {
                let copies = self.loan_service.list_instances_for_book(book_id.as_str()).await?;
                PaginatedResult::new(None, copies.len(), None, copies)
            }
            None => self.loan_service.list_all_ordered_by_creation(req.page.as_deref(), self.page_size).await?,
        };
        Ok(ListInstancesCommandResponse { instances })
    }
}

#[cfg(test)]
mod tests {
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    use crate::core::command::Command;
    use crate::core::repository::Repository;
    use crate::instances::domain::model::BookInstanceEntity;
    use crate::instances::repository::memory_instance_repository::MemoryBookInstanceRepository;
    use crate::loans::command::list_instances_cmd::{ListInstancesCommand, ListInstancesCommandRequest};
    use crate::loans::domain::service::LoanServiceImpl;
    use crate::patrons::repository::memory_patron_repository::MemoryPatronRepository;
    use crate::utils::memory::MemoryTable;

    #[tokio::test]
    async fn test_should_list_copies_of_one_book() {
        let instances = MemoryBookInstanceRepository::new(MemoryTable::new("instance_id"), "main");
        for book_id in ["dune", "dune", "dune", "emma"] {
            instances.create(&BookInstanceEntity::new("main", book_id, "Ace")).await.expect("should create");
        }
        let svc = LoanServiceImpl::new(
            Box::new(instances),
            Box::new(MemoryBookRepository::new(MemoryTable::new("book_id"), "main")),
            Box::new(MemoryPatronRepository::new(MemoryTable::new("patron_id"), "main")));
        let cmd = ListInstancesCommand::new(Box::new(svc), 2);

        let dune = cmd.execute(ListInstancesCommandRequest { page: None, book_id: Some("dune".to_string()) })
            .await.expect("should list");
        assert_eq!(3, dune.instances.records.len());
        assert!(dune.instances.records.iter().all(|i| i.book_id == "dune"));
        assert_eq!(None, dune.instances.next_page);

        let all = cmd.execute(ListInstancesCommandRequest { page: None, book_id: None })
            .await.expect("should list");
        assert_eq!(2, all.instances.records.len());
        assert!(all.instances.next_page.is_some());
    }
}

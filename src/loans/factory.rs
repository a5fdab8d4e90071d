use crate::books::factory::create_book_repository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::instances::factory::create_instance_repository;
use crate::loans::domain::LoanService;
use crate::loans::domain::service::LoanServiceImpl;
use crate::patrons::factory::create_patron_repository;

pub(crate) async fn create_loan_service(config: &Configuration, store: RepositoryStore) -> Box<dyn LoanService> {
    let instance_repo = create_instance_repository(config, store).await;
    let book_repo = create_book_repository(config, store).await;
    let patron_repo = create_patron_repository(config, store).await;
    Box::new(LoanServiceImpl::new(instance_repo, book_repo, patron_repo))
}

use crate::core::clock::SystemClock;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::instances::factory::create_instance_repository;
use crate::renewals::domain::RenewalService;
use crate::renewals::domain::service::RenewalServiceImpl;

pub(crate) async fn create_renewal_service(config: &Configuration, store: RepositoryStore) -> Box<dyn RenewalService> {
    let instance_repo = create_instance_repository(config, store).await;
    let publisher = create_publisher(store.gateway_publisher()).await;
    Box::new(RenewalServiceImpl::new(config, instance_repo, publisher, Box::new(SystemClock)))
}

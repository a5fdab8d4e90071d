use crate::authors::factory::create_author_repository;
use crate::books::factory::create_book_repository;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::genres::factory::create_genre_repository;
use crate::instances::factory::create_instance_repository;
use crate::patrons::factory::create_patron_repository;

pub(crate) async fn create_catalog_service(config: &Configuration, store: RepositoryStore) -> Box<dyn CatalogService> {
    let genre_repo = create_genre_repository(config, store).await;
    let author_repo = create_author_repository(config, store).await;
    let book_repo = create_book_repository(config, store).await;
    let instance_repo = create_instance_repository(config, store).await;
    let patron_repo = create_patron_repository(config, store).await;
    let publisher = create_publisher(store.gateway_publisher()).await;
    Box::new(CatalogServiceImpl::new(config, genre_repo, author_repo, book_repo, instance_repo, patron_repo, publisher))
}

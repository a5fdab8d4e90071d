use std::collections::{HashMap, HashSet};
use async_trait::async_trait;
use tracing::{debug, info, warn};
use crate::authors::domain::model::AuthorEntity;
use crate::authors::domain::validate_author;
use crate::authors::dto::AuthorDto;
use crate::authors::repository::AuthorRepository;
use crate::books::domain::model::BookEntity;
use crate::books::domain::validate_book;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::{AuthorDetailDto, BookDetailDto, BookListingDto, CatalogSummary};
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult, LoanStatus, PaginatedResult};
use crate::gateway::events::EventPublisher;
use crate::genres::domain::model::GenreEntity;
use crate::genres::domain::validate_genre;
use crate::genres::dto::GenreDto;
use crate::genres::repository::GenreRepository;
use crate::instances::domain::model::BookInstanceEntity;
use crate::instances::dto::BookInstanceDto;
use crate::instances::repository::BookInstanceRepository;
use crate::patrons::domain::model::PatronEntity;
use crate::patrons::dto::PatronDto;
use crate::patrons::repository::PatronRepository;

const CATALOG_GROUP: &str = "catalog";

pub(crate) struct CatalogServiceImpl {
    branch_id: String,
    page_size: usize,
    genre_repository: Box<dyn GenreRepository>,
    author_repository: Box<dyn AuthorRepository>,
    book_repository: Box<dyn BookRepository>,
    instance_repository: Box<dyn BookInstanceRepository>,
    patron_repository: Box<dyn PatronRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(config: &Configuration,
                      genre_repository: Box<dyn GenreRepository>,
                      author_repository: Box<dyn AuthorRepository>,
                      book_repository: Box<dyn BookRepository>,
                      instance_repository: Box<dyn BookInstanceRepository>,
                      patron_repository: Box<dyn PatronRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            page_size: config.page_size,
            genre_repository,
            author_repository,
            book_repository,
            instance_repository,
            patron_repository,
            events_publisher,
        }
    }

    // the ISBN may only be held by the book with the given id
    async fn check_isbn(&self, isbn: &str, book_id: &str) -> LibraryResult<()> {
        match self.book_repository.find_by_isbn(isbn).await? {
            Some(existing) if existing.book_id != book_id => {
                Err(LibraryError::duplicate_key(format!("isbn {} already catalogued", isbn).as_str()))
            }
            _ => Ok(()),
        }
    }

    async fn author_of(&self, author_id: Option<&str>) -> LibraryResult<Option<AuthorDto>> {
        match author_id {
            Some(id) => match self.author_repository.get(id).await {
                Ok(author) => Ok(Some(AuthorDto::from(&author))),
                Err(LibraryError::NotFound { .. }) => Ok(None),
                Err(err) => Err(err),
            },
            None => Ok(None),
        }
    }

    async fn publish_added<T: serde::Serialize + Sync>(&self, name: &str, key: &str, data: &T) {
        self.publish(name, key, DomainEvent::added(name, CATALOG_GROUP, key, &HashMap::new(), data)).await
    }

    async fn publish_updated<T: serde::Serialize + Sync>(&self, name: &str, key: &str, data: &T) {
        self.publish(name, key, DomainEvent::updated(name, CATALOG_GROUP, key, &HashMap::new(), data)).await
    }

    async fn publish_deleted(&self, name: &str, key: &str) {
        self.publish(name, key, DomainEvent::deleted(name, CATALOG_GROUP, key, &HashMap::new(), &key.to_string())).await
    }

    // the write is already stored, so a lost event is logged rather than returned
    async fn publish(&self, name: &str, key: &str, event: serde_json::Result<DomainEvent>) {
        let published = match event {
            Ok(event) => self.events_publisher.publish(&event).await,
            Err(err) => Err(err.into()),
        };
        if let Err(err) = published {
            warn!(name, key, error = %err, "catalog event not published");
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_genre(&self, genre: &GenreDto) -> LibraryResult<GenreDto> {
        validate_genre(genre.name.as_str())?;
        let mut entity = GenreEntity::from(genre);
        entity.branch_id = self.branch_id.to_string();
        let _ = self.genre_repository.create(&entity).await?;
        let dto = GenreDto::from(&entity);
        self.publish_added("genres", dto.genre_id.as_str(), &dto).await;
        info!(genre_id = dto.genre_id.as_str(), name = dto.name.as_str(), "genre added");
        Ok(dto)
    }

    async fn list_genres(&self, page: Option<&str>) -> LibraryResult<PaginatedResult<GenreDto>> {
        let res = self.genre_repository.list_by_name(page, self.page_size).await?;
        Ok(res.map(GenreDto::from))
    }

    async fn add_author(&self, author: &AuthorDto) -> LibraryResult<AuthorDto> {
        validate_author(author.first_name.as_str(), author.last_name.as_str())?;
        let mut entity = AuthorEntity::from(author);
        entity.branch_id = self.branch_id.to_string();
        let _ = self.author_repository.create(&entity).await?;
        let dto = AuthorDto::from(&entity);
        self.publish_added("authors", dto.author_id.as_str(), &dto).await;
        info!(author_id = dto.author_id.as_str(), "author added");
        Ok(dto)
    }

    async fn update_author(&self, author: &AuthorDto) -> LibraryResult<AuthorDto> {
        validate_author(author.first_name.as_str(), author.last_name.as_str())?;
        let mut entity = AuthorEntity::from(author);
        entity.branch_id = self.branch_id.to_string();
        let _ = self.author_repository.update(&entity).await?;
        let dto = AuthorDto::from(&self.author_repository.get(author.author_id.as_str()).await?);
        self.publish_updated("authors", dto.author_id.as_str(), &dto).await;
        info!(author_id = dto.author_id.as_str(), version = dto.version, "author updated");
        Ok(dto)
    }

    async fn remove_author(&self, id: &str) -> LibraryResult<()> {
        let books = self.book_repository.count(
            &HashMap::from([("author_id".to_string(), id.to_string())])).await?;
        if books > 0 {
            return Err(LibraryError::validation(
                format!("author {} is referenced by {} book(s)", id, books).as_str(), Some("ProtectedError".to_string())));
        }
        let _ = self.author_repository.delete(id).await?;
        self.publish_deleted("authors", id).await;
        info!(author_id = id, "author removed");
        Ok(())
    }

    async fn find_author_by_id(&self, id: &str) -> LibraryResult<AuthorDto> {
        self.author_repository.get(id).await.map(|a| AuthorDto::from(&a))
    }

    async fn list_authors(&self, page: Option<&str>) -> LibraryResult<PaginatedResult<AuthorDto>> {
        let res = self.author_repository.list_by_name(page, self.page_size).await?;
        Ok(res.map(AuthorDto::from))
    }

    async fn author_detail(&self, id: &str, page: Option<&str>) -> LibraryResult<AuthorDetailDto> {
        let author = self.author_repository.get(id).await?;
        let res = self.book_repository.find_by_author_id(id, page, self.page_size).await?;
        Ok(AuthorDetailDto { author: AuthorDto::from(&author), books: res.map(BookDto::from) })
    }

    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        validate_book(book.title.as_str(), book.isbn.as_str(), book.summary.as_str())?;
        self.check_isbn(book.isbn.as_str(), book.book_id.as_str()).await?;
        if let Some(author_id) = &book.author_id {
            let _ = self.author_repository.get(author_id.as_str()).await?;
        }
        let mut entity = BookEntity::from(book);
        entity.branch_id = self.branch_id.to_string();
        let _ = self.book_repository.create(&entity).await?;
        let dto = BookDto::from(&entity);
        self.publish_added("books", dto.book_id.as_str(), &dto).await;
        info!(book_id = dto.book_id.as_str(), isbn = dto.isbn.as_str(), "book added");
        Ok(dto)
    }

    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        validate_book(book.title.as_str(), book.isbn.as_str(), book.summary.as_str())?;
        self.check_isbn(book.isbn.as_str(), book.book_id.as_str()).await?;
        let mut entity = BookEntity::from(book);
        entity.branch_id = self.branch_id.to_string();
        let _ = self.book_repository.update(&entity).await?;
        let dto = BookDto::from(&self.book_repository.get(book.book_id.as_str()).await?);
        self.publish_updated("books", dto.book_id.as_str(), &dto).await;
        info!(book_id = dto.book_id.as_str(), version = dto.version, "book updated");
        Ok(dto)
    }

    async fn remove_book(&self, id: &str) -> LibraryResult<()> {
        let copies = self.instance_repository.count(
            &HashMap::from([("book_id".to_string(), id.to_string())])).await?;
        if copies > 0 {
            return Err(LibraryError::validation(
                format!("book {} still has {} copies", id, copies).as_str(), Some("ProtectedError".to_string())));
        }
        let _ = self.book_repository.delete(id).await?;
        self.publish_deleted("books", id).await;
        info!(book_id = id, "book removed");
        Ok(())
    }

    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto> {
        self.book_repository.get(id).await.map(|b| BookDto::from(&b))
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto> {
        match self.book_repository.find_by_isbn(isbn).await? {
            Some(book) => Ok(BookDto::from(&book)),
            None => Err(LibraryError::not_found(format!("isbn {} not found", isbn).as_str())),
        }
    }

    async fn list_books(&self, page: Option<&str>) -> LibraryResult<PaginatedResult<BookListingDto>> {
        let res = self.book_repository.list_by_title(page, self.page_size).await?;
        debug!(books = res.records.len(), "listing books");
        let mut authors: HashMap<String, Option<AuthorDto>> = HashMap::new();
        let mut listing = Vec::with_capacity(res.records.len());
        for book in &res.records {
            let author = match &book.author_id {
                Some(author_id) => {
                    if !authors.contains_key(author_id) {
                        let found = self.author_of(Some(author_id.as_str())).await?;
                        authors.insert(author_id.clone(), found);
                    }
                    authors.get(author_id).cloned().flatten()
                }
                None => None,
            };
            listing.push(BookListingDto { book: BookDto::from(book), author });
        }
        Ok(PaginatedResult::new(res.page.as_deref(), res.page_size, res.next_page.clone(), listing))
    }

    async fn book_detail(&self, id: &str) -> LibraryResult<BookDetailDto> {
        let book = self.book_repository.get(id).await?;
        let author = self.author_of(book.author_id.as_deref()).await?;
        let unique: HashSet<&String> = book.genre_ids.iter().collect();
        let genre_ids: Vec<String> = unique.into_iter().cloned().collect();
        let genres = self.genre_repository.find_by_ids(&genre_ids).await?;
        let instances = self.instance_repository.list_all_for_book(id).await?;
        Ok(BookDetailDto {
            book: BookDto::from(&book),
            author,
            genres: genres.iter().map(GenreDto::from).collect(),
            instances: instances.iter().map(BookInstanceDto::from).collect(),
        })
    }

    async fn add_instance(&self, instance: &BookInstanceDto) -> LibraryResult<BookInstanceDto> {
        let _ = self.book_repository.get(instance.book_id.as_str()).await?;
        let mut entity = BookInstanceEntity::from(instance);
        entity.branch_id = self.branch_id.to_string();
        if !entity.loan_status.tracks_due_date() {
            entity.set_due_back(None);
        }
        let _ = self.instance_repository.create(&entity).await?;
        let dto = BookInstanceDto::from(&entity);
        self.publish_added("instances", dto.instance_id.as_str(), &dto).await;
        info!(instance_id = dto.instance_id.as_str(), book_id = dto.book_id.as_str(), status = %dto.loan_status, "instance added");
        Ok(dto)
    }

    async fn update_instance(&self, instance: &BookInstanceDto) -> LibraryResult<BookInstanceDto> {
        let mut entity = BookInstanceEntity::from(instance);
        entity.branch_id = self.branch_id.to_string();
        if !entity.loan_status.tracks_due_date() {
            entity.set_due_back(None);
        }
        let _ = self.instance_repository.update(&entity).await?;
        let dto = BookInstanceDto::from(&self.instance_repository.get(instance.instance_id.as_str()).await?);
        self.publish_updated("instances", dto.instance_id.as_str(), &dto).await;
        info!(instance_id = dto.instance_id.as_str(), status = %dto.loan_status, "instance updated");
        Ok(dto)
    }

    async fn find_instance_by_id(&self, id: &str) -> LibraryResult<BookInstanceDto> {
        self.instance_repository.get(id).await.map(|i| BookInstanceDto::from(&i))
    }

    async fn add_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto> {
        if patron.username.trim().is_empty() {
            return Err(LibraryError::validation("username is required", Some("username".to_string())));
        }
        if self.patron_repository.find_by_username(patron.username.as_str()).await?.is_some() {
            return Err(LibraryError::duplicate_key(format!("username {} is taken", patron.username).as_str()));
        }
        let mut entity = PatronEntity::from(patron);
        entity.branch_id = self.branch_id.to_string();
        let _ = self.patron_repository.create(&entity).await?;
        let dto = PatronDto::from(&entity);
        self.publish_added("patrons", dto.patron_id.as_str(), &dto).await;
        info!(patron_id = dto.patron_id.as_str(), "patron added");
        Ok(dto)
    }

    async fn find_patron_by_id(&self, id: &str) -> LibraryResult<PatronDto> {
        self.patron_repository.get(id).await.map(|p| PatronDto::from(&p))
    }

    async fn summary(&self) -> LibraryResult<CatalogSummary> {
        let available = HashMap::from([("loan_status".to_string(), LoanStatus::Available.to_string())]);
        Ok(CatalogSummary {
            num_books: self.book_repository.count(&HashMap::new()).await?,
            num_instances: self.instance_repository.count(&HashMap::new()).await?,
            num_instances_available: self.instance_repository.count(&available).await?,
            num_authors: self.author_repository.count(&HashMap::new()).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use async_trait::async_trait;
    use chrono::Duration;
    use lazy_static::lazy_static;
    use crate::authors::dto::AuthorDto;
    use crate::authors::repository::memory_author_repository::MemoryAuthorRepository;
    use crate::books::dto::BookDto;
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::domain::service::CatalogServiceImpl;
    use crate::catalog::factory;
    use crate::core::domain::Configuration;
    use crate::core::events::DomainEvent;
    use crate::core::library::{LibraryError, LoanStatus};
    use crate::core::repository::RepositoryStore;
    use crate::gateway::events::EventPublisher;
    use crate::gateway::logs::publisher::LogPublisher;
    use crate::genres::dto::GenreDto;
    use crate::genres::repository::memory_genre_repository::MemoryGenreRepository;
    use crate::instances::dto::BookInstanceDto;
    use crate::instances::repository::memory_instance_repository::MemoryBookInstanceRepository;
    use crate::patrons::dto::PatronDto;
    use crate::patrons::repository::memory_patron_repository::MemoryPatronRepository;
    use crate::utils::memory::MemoryTable;

    lazy_static! {
        static ref SHARED_SVC: AsyncOnce<Box<dyn CatalogService>> = AsyncOnce::new(async {
                factory::create_catalog_service(&Configuration::new("catalog-shared"), RepositoryStore::InMemory).await
            });
    }

    fn isolated() -> CatalogServiceImpl {
        let mut config = Configuration::new("main");
        config.page_size = 2;
        CatalogServiceImpl::new(
            &config,
            Box::new(MemoryGenreRepository::new(MemoryTable::new("genre_id"), "main")),
            Box::new(MemoryAuthorRepository::new(MemoryTable::new("author_id"), "main")),
            Box::new(MemoryBookRepository::new(MemoryTable::new("book_id"), "main")),
            Box::new(MemoryBookInstanceRepository::new(MemoryTable::new("instance_id"), "main")),
            Box::new(MemoryPatronRepository::new(MemoryTable::new("patron_id"), "main")),
            Box::new(LogPublisher::default()))
    }

    #[tokio::test]
    async fn test_should_add_and_update_book() {
        let svc = SHARED_SVC.get().await;
        let mut book = svc.add_book(&BookDto::new("any", "9780000000001", "Shared title")).await.expect("should add book");
        assert_eq!("catalog-shared", book.branch_id.as_str());

        book.title = "New title".to_string();
        let updated = svc.update_book(&book).await.expect("should update book");
        assert_eq!(book.version + 1, updated.version);
        assert_eq!("New title", svc.find_book_by_id(book.book_id.as_str()).await.expect("should load").title.as_str());
        assert_eq!(book.book_id, svc.find_book_by_isbn("9780000000001").await.expect("should find").book_id);
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_isbn_and_bad_books() {
        let svc = isolated();
        svc.add_book(&BookDto::new("main", "9780441013593", "Dune")).await.expect("should add book");
        let err = svc.add_book(&BookDto::new("main", "9780441013593", "Dune again")).await.expect_err("should reject");
        assert!(matches!(err, LibraryError::DuplicateKey { .. }));
        let err = svc.add_book(&BookDto::new("main", "97804410135930", "Too long")).await.expect_err("should reject");
        assert!(matches!(err, LibraryError::Validation { .. }));
        assert!(matches!(svc.find_book_by_isbn("missing").await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_protect_referenced_author_and_book() {
        let svc = isolated();
        let author = svc.add_author(&AuthorDto::new("main", "Frank", "Herbert")).await.expect("should add author");
        let mut book = BookDto::new("main", "9780441013593", "Dune");
        book.author_id = Some(author.author_id.clone());
        let book = svc.add_book(&book).await.expect("should add book");
        let copy = svc.add_instance(&BookInstanceDto::new("main", book.book_id.as_str(), "Ace")).await.expect("should add copy");
        assert_eq!(LoanStatus::Maintenance, copy.loan_status);

        let err = svc.remove_author(author.author_id.as_str()).await.expect_err("should refuse");
        assert_eq!(Some("ProtectedError"), err.reason_code());
        let err = svc.remove_book(book.book_id.as_str()).await.expect_err("should refuse");
        assert_eq!(Some("ProtectedError"), err.reason_code());

        let orphan = svc.add_author(&AuthorDto::new("main", "Jane", "Austen")).await.expect("should add author");
        svc.remove_author(orphan.author_id.as_str()).await.expect("should remove author");
        assert!(matches!(svc.find_author_by_id(orphan.author_id.as_str()).await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_build_book_detail() {
        let svc = isolated();
        let scifi = svc.add_genre(&GenreDto::new("main", "Science Fiction")).await.expect("should add genre");
        let classic = svc.add_genre(&GenreDto::new("main", "Classic")).await.expect("should add genre");
        let author = svc.add_author(&AuthorDto::new("main", "Frank", "Herbert")).await.expect("should add author");
        let mut book = BookDto::new("main", "9780441013593", "Dune");
        book.author_id = Some(author.author_id.clone());
        book.genre_ids = vec![scifi.genre_id.clone(), classic.genre_id.clone()];
        let book = svc.add_book(&book).await.expect("should add book");
        let mut later = BookInstanceDto::new("main", book.book_id.as_str(), "Ace 1990");
        later.created_at += Duration::seconds(1);
        let second = svc.add_instance(&later).await.expect("should add");
        let first = svc.add_instance(&BookInstanceDto::new("main", book.book_id.as_str(), "Ace 1965")).await.expect("should add");

        let detail = svc.book_detail(book.book_id.as_str()).await.expect("should load detail");
        assert_eq!(Some("Herbert, Frank".to_string()), detail.author.map(|a| a.to_string()));
        let genres: Vec<&str> = detail.genres.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(vec!["Classic", "Science Fiction"], genres);
        let ids: Vec<&str> = detail.instances.iter().map(|i| i.instance_id.as_str()).collect();
        assert_eq!(vec![first.instance_id.as_str(), second.instance_id.as_str()], ids);
    }

    #[tokio::test]
    async fn test_should_list_books_by_title_with_authors() {
        let svc = isolated();
        let author = svc.add_author(&AuthorDto::new("main", "Jane", "Austen")).await.expect("should add author");
        for (isbn, title) in [("1", "Persuasion"), ("2", "Emma"), ("3", "Sanditon")] {
            let mut book = BookDto::new("main", isbn, title);
            book.author_id = Some(author.author_id.clone());
            svc.add_book(&book).await.expect("should add book");
        }
        let first = svc.list_books(None).await.expect("should list");
        assert_eq!(vec!["Emma", "Persuasion"], first.records.iter().map(|b| b.book.title.as_str()).collect::<Vec<_>>());
        assert!(first.records.iter().all(|b| b.author.is_some()));
        let second = svc.list_books(first.next_page.as_deref()).await.expect("should list");
        assert_eq!(1, second.records.len());
        assert_eq!(None, second.next_page);
    }

    #[tokio::test]
    async fn test_should_count_summary() {
        let svc = isolated();
        let book = svc.add_book(&BookDto::new("main", "9780441013593", "Dune")).await.expect("should add book");
        svc.add_author(&AuthorDto::new("main", "Frank", "Herbert")).await.expect("should add author");
        let mut available = BookInstanceDto::new("main", book.book_id.as_str(), "Ace");
        available.loan_status = LoanStatus::Available;
        svc.add_instance(&available).await.expect("should add");
        let mut copy = svc.add_instance(&BookInstanceDto::new("main", book.book_id.as_str(), "Ace")).await.expect("should add");

        let summary = svc.summary().await.expect("should count");
        assert_eq!((1, 2, 1, 1), (summary.num_books, summary.num_instances,
                                  summary.num_instances_available, summary.num_authors));

        copy.loan_status = LoanStatus::Available;
        svc.update_instance(&copy).await.expect("should update");
        assert_eq!(2, svc.summary().await.expect("should count").num_instances_available);
    }

    #[tokio::test]
    async fn test_should_add_patron_once() {
        let svc = isolated();
        let patron = svc.add_patron(&PatronDto::new("main", "alice", "alice@example.com")).await.expect("should add");
        assert_eq!(patron.patron_id, svc.find_patron_by_id(patron.patron_id.as_str()).await.expect("should find").patron_id);
        let err = svc.add_patron(&PatronDto::new("main", "alice", "other@example.com")).await.expect_err("should reject");
        assert!(matches!(err, LibraryError::DuplicateKey { .. }));
    }

    struct UnreachablePublisher;

    #[async_trait]
    impl EventPublisher for UnreachablePublisher {
        async fn create_topic(&mut self, topic: &str) -> Result<String, LibraryError> {
            Ok(topic.to_string())
        }

        async fn get_topics(&mut self) -> Result<Vec<String>, LibraryError> {
            Ok(vec![])
        }

        async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
            Err(LibraryError::unavailable(format!("topic is not found {}", event.name).as_str(), None, true))
        }
    }

    #[tokio::test]
    async fn test_should_keep_writes_when_event_is_lost() {
        let config = Configuration::new("main");
        let svc = CatalogServiceImpl::new(
            &config,
            Box::new(MemoryGenreRepository::new(MemoryTable::new("genre_id"), "main")),
            Box::new(MemoryAuthorRepository::new(MemoryTable::new("author_id"), "main")),
            Box::new(MemoryBookRepository::new(MemoryTable::new("book_id"), "main")),
            Box::new(MemoryBookInstanceRepository::new(MemoryTable::new("instance_id"), "main")),
            Box::new(MemoryPatronRepository::new(MemoryTable::new("patron_id"), "main")),
            Box::new(UnreachablePublisher));
        let mut book = svc.add_book(&BookDto::new("main", "9780441013593", "Dune")).await.expect("should add book");
        assert_eq!("Dune", svc.find_book_by_id(book.book_id.as_str()).await.expect("should load").title.as_str());

        book.title = "Dune Messiah".to_string();
        let updated = svc.update_book(&book).await.expect("should update book");
        assert_eq!(book.version + 1, updated.version);
        svc.remove_book(book.book_id.as_str()).await.expect("should remove book");
        assert!(matches!(svc.find_book_by_id(book.book_id.as_str()).await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_limit_field_lengths() {
        let svc = isolated();
        let mut book = BookDto::new("main", "9780441013593", "t".repeat(201).as_str());
        assert_eq!(Some("title"), svc.add_book(&book).await.expect_err("should reject").reason_code());
        book.title = "Dune".to_string();
        book.summary = "s".repeat(1001);
        assert_eq!(Some("summary"), svc.add_book(&book).await.expect_err("should reject").reason_code());

        let err = svc.add_author(&AuthorDto::new("main", "f".repeat(101).as_str(), "Herbert")).await.expect_err("should reject");
        assert_eq!(Some("first_name"), err.reason_code());
        let mut author = svc.add_author(&AuthorDto::new("main", "Frank", "Herbert")).await.expect("should add author");
        author.last_name = "l".repeat(101);
        let err = svc.update_author(&author).await.expect_err("should reject");
        assert_eq!(Some("last_name"), err.reason_code());

        let err = svc.add_genre(&GenreDto::new("main", "g".repeat(201).as_str())).await.expect_err("should reject");
        assert_eq!(Some("name"), err.reason_code());
        assert_eq!(0, svc.list_genres(None).await.expect("should list").records.len());
    }

    #[tokio::test]
    async fn test_should_page_author_detail_books() {
        let svc = isolated();
        let author = svc.add_author(&AuthorDto::new("main", "Jane", "Austen")).await.expect("should add author");
        let other = svc.add_author(&AuthorDto::new("main", "Frank", "Herbert")).await.expect("should add author");
        for (isbn, title, author_id) in [("9780141439518", "Pride and Prejudice", &author.author_id),
                                         ("9780141439587", "Emma", &author.author_id),
                                         ("9780141439686", "Persuasion", &author.author_id),
                                         ("9780441013593", "Dune", &other.author_id)] {
            let mut book = BookDto::new("main", isbn, title);
            book.author_id = Some(author_id.clone());
            svc.add_book(&book).await.expect("should add book");
        }

        let first = svc.author_detail(author.author_id.as_str(), None).await.expect("should load detail");
        assert_eq!("Austen", first.author.last_name.as_str());
        assert_eq!(vec!["Emma", "Persuasion"], first.books.records.iter().map(|b| b.title.as_str()).collect::<Vec<_>>());
        let second = svc.author_detail(author.author_id.as_str(), first.books.next_page.as_deref()).await.expect("should load detail");
        assert_eq!(vec!["Pride and Prejudice"], second.books.records.iter().map(|b| b.title.as_str()).collect::<Vec<_>>());
        assert_eq!(None, second.books.next_page);
        assert!(matches!(svc.author_detail("missing", None).await, Err(LibraryError::NotFound { .. })));
    }
}

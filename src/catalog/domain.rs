pub mod service;

use async_trait::async_trait;
use crate::authors::dto::AuthorDto;
use crate::books::dto::BookDto;
use crate::catalog::dto::{AuthorDetailDto, BookDetailDto, BookListingDto, CatalogSummary};
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::genres::dto::GenreDto;
use crate::instances::dto::BookInstanceDto;
use crate::patrons::dto::PatronDto;

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn add_genre(&self, genre: &GenreDto) -> LibraryResult<GenreDto>;
    async fn list_genres(&self, page: Option<&str>) -> LibraryResult<PaginatedResult<GenreDto>>;

    async fn add_author(&self, author: &AuthorDto) -> LibraryResult<AuthorDto>;
    async fn update_author(&self, author: &AuthorDto) -> LibraryResult<AuthorDto>;
    // refused while any book references the author
    async fn remove_author(&self, id: &str) -> LibraryResult<()>;
    async fn find_author_by_id(&self, id: &str) -> LibraryResult<AuthorDto>;
    async fn list_authors(&self, page: Option<&str>) -> LibraryResult<PaginatedResult<AuthorDto>>;
    async fn author_detail(&self, id: &str, page: Option<&str>) -> LibraryResult<AuthorDetailDto>;

    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    // refused while copies of the book exist
    async fn remove_book(&self, id: &str) -> LibraryResult<()>;
    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto>;
    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto>;
    async fn list_books(&self, page: Option<&str>) -> LibraryResult<PaginatedResult<BookListingDto>>;
    async fn book_detail(&self, id: &str) -> LibraryResult<BookDetailDto>;

    async fn add_instance(&self, instance: &BookInstanceDto) -> LibraryResult<BookInstanceDto>;
    async fn update_instance(&self, instance: &BookInstanceDto) -> LibraryResult<BookInstanceDto>;
    async fn find_instance_by_id(&self, id: &str) -> LibraryResult<BookInstanceDto>;

    async fn add_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto>;
    async fn find_patron_by_id(&self, id: &str) -> LibraryResult<PatronDto>;

    async fn summary(&self) -> LibraryResult<CatalogSummary>;
}

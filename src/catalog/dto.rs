use serde::{Deserialize, Serialize};
use crate::authors::dto::AuthorDto;
use crate::books::dto::BookDto;
use crate::core::library::PaginatedResult;
use crate::genres::dto::GenreDto;
use crate::instances::dto::BookInstanceDto;

// counts shown on the catalog home page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct CatalogSummary {
    pub num_books: usize,
    pub num_instances: usize,
    pub num_instances_available: usize,
    pub num_authors: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookListingDto {
    pub book: BookDto,
    pub author: Option<AuthorDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDetailDto {
    pub book: BookDto,
    pub author: Option<AuthorDto>,
    pub genres: Vec<GenreDto>,
    pub instances: Vec<BookInstanceDto>,
}

// an author with one page of their books, ordered by title
#[derive(Debug, Clone, Serialize)]
pub(crate) struct AuthorDetailDto {
    pub author: AuthorDto,
    pub books: PaginatedResult<BookDto>,
}

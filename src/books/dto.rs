use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
    pub book_id: String,
    pub version: i64,
    pub branch_id: String,
    pub title: String,
    pub author_id: Option<String>,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<String>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookDto {
    pub fn new(branch_id: &str, isbn: &str, title: &str) -> BookDto {
        BookDto {
            book_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            title: title.to_string(),
            author_id: None,
            summary: String::new(),
            isbn: isbn.to_string(),
            genre_ids: vec![],
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for BookDto {
    fn id(&self) -> String {
        self.book_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Display for BookDto {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            title: other.title.to_string(),
            author_id: other.author_id.clone(),
            summary: other.summary.to_string(),
            isbn: other.isbn.to_string(),
            genre_ids: other.genre_ids.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            book_id: other.book_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            title: other.title.to_string(),
            author_id: other.author_id.clone(),
            summary: other.summary.to_string(),
            isbn: other.isbn.to_string(),
            genre_ids: other.genre_ids.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::books::dto::BookDto;

    #[tokio::test]
    async fn test_should_build_books() {
        let mut book = BookDto::new("test", "isbn", "title");
        book.author_id = Some("author-1".to_string());
        book.genre_ids = vec!["genre-1".to_string()];
        assert_eq!("title", book.to_string());
        assert_eq!(book, BookDto::from(&BookEntity::from(&book)));
    }
}

use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// BookEntity is a catalogued title; each physical copy of it is a book instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookEntity {
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

impl BookEntity {
    pub fn new(branch_id: &str, isbn: &str, title: &str) -> Self {
        Self {
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

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.book_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// GenreEntity is a category of books, e.g. "Science Fiction".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct GenreEntity {
    pub genre_id: String,
    pub version: i64,
    pub branch_id: String,
    pub name: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl GenreEntity {
    pub fn new(branch_id: &str, name: &str) -> Self {
        Self {
            genre_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            name: name.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for GenreEntity {
    fn id(&self) -> String {
        self.genre_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

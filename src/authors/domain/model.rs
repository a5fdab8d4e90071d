use chrono::{NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::authors::domain::sort_key;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct AuthorEntity {
    pub author_id: String,
    pub version: i64,
    pub branch_id: String,
    pub first_name: String,
    pub last_name: String,
    pub sort_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl AuthorEntity {
    pub fn new(branch_id: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            author_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            sort_name: sort_key(last_name, first_name),
            date_of_birth: None,
            date_of_death: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for AuthorEntity {
    fn id(&self) -> String {
        self.author_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

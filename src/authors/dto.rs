use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::authors::domain::model::AuthorEntity;
use crate::authors::domain::sort_key;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// AuthorDto is a data transfer object for Author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct AuthorDto {
    pub author_id: String,
    pub version: i64,
    pub branch_id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl AuthorDto {
    pub fn new(branch_id: &str, first_name: &str, last_name: &str) -> AuthorDto {
        AuthorDto {
            author_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth: None,
            date_of_death: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for AuthorDto {
    fn id(&self) -> String {
        self.author_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Display for AuthorDto {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}, {}", self.last_name, self.first_name)
    }
}

impl From<&AuthorEntity> for AuthorDto {
    fn from(other: &AuthorEntity) -> Self {
        Self {
            author_id: other.author_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            first_name: other.first_name.to_string(),
            last_name: other.last_name.to_string(),
            date_of_birth: other.date_of_birth,
            date_of_death: other.date_of_death,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&AuthorDto> for AuthorEntity {
    fn from(other: &AuthorDto) -> Self {
        Self {
            author_id: other.author_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            first_name: other.first_name.to_string(),
            last_name: other.last_name.to_string(),
            sort_name: sort_key(other.last_name.as_str(), other.first_name.as_str()),
            date_of_birth: other.date_of_birth,
            date_of_death: other.date_of_death,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::Permission;
use crate::patrons::domain::model::PatronEntity;
use crate::utils::date::serializer;

// Patron abstracts library member.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct PatronDto {
    pub patron_id: String,
    pub version: i64,
    pub branch_id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub permissions: Vec<Permission>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl PatronDto {
    pub(crate) fn new(branch_id: &str, username: &str, email: &str) -> Self {
        Self {
            patron_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            username: username.to_string(),
            first_name: "".to_string(),
            last_name: "".to_string(),
            email: email.to_string(),
            permissions: vec![],
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub(crate) fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    // full name when known, otherwise the login name
    pub(crate) fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        if full.trim().is_empty() {
            self.username.to_string()
        } else {
            full.trim().to_string()
        }
    }
}

impl Identifiable for PatronDto {
    fn id(&self) -> String {
        self.patron_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl From<&PatronEntity> for PatronDto {
    fn from(other: &PatronEntity) -> Self {
        Self {
            patron_id: other.patron_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            username: other.username.to_string(),
            first_name: other.first_name.to_string(),
            last_name: other.last_name.to_string(),
            email: other.email.to_string(),
            permissions: other.permissions.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&PatronDto> for PatronEntity {
    fn from(other: &PatronDto) -> Self {
        Self {
            patron_id: other.patron_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            username: other.username.to_string(),
            first_name: other.first_name.to_string(),
            last_name: other.last_name.to_string(),
            email: other.email.to_string(),
            permissions: other.permissions.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

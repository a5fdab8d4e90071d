use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::Permission;
use crate::utils::date::serializer;

// PatronEntity is a library member account; borrowers of book instances are patrons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PatronEntity {
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

impl PatronEntity {
    pub fn new(branch_id: &str, username: &str, email: &str) -> Self {
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
}

impl Identifiable for PatronEntity {
    fn id(&self) -> String {
        self.patron_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

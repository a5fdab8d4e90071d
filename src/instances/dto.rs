use chrono::{NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::LoanStatus;
use crate::instances::domain::due_sort_key;
use crate::instances::domain::model::BookInstanceEntity;
use crate::utils::date::serializer;

// BookInstanceDto is a data transfer object for a borrowable copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookInstanceDto {
    pub instance_id: String,
    pub version: i64,
    pub branch_id: String,
    pub book_id: String,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub loan_status: LoanStatus,
    pub borrower_id: Option<String>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookInstanceDto {
    pub fn new(branch_id: &str, book_id: &str, imprint: &str) -> BookInstanceDto {
        BookInstanceDto {
            instance_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            book_id: book_id.to_string(),
            imprint: imprint.to_string(),
            due_back: None,
            loan_status: LoanStatus::default(),
            borrower_id: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.loan_status.is_overdue(self.due_back, today)
    }

    // "<id> (<book title>)"
    pub fn display_with(&self, book_title: &str) -> String {
        format!("{} ({})", self.instance_id, book_title)
    }
}

impl Identifiable for BookInstanceDto {
    fn id(&self) -> String {
        self.instance_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl From<&BookInstanceEntity> for BookInstanceDto {
    fn from(other: &BookInstanceEntity) -> Self {
        Self {
            instance_id: other.instance_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            book_id: other.book_id.to_string(),
            imprint: other.imprint.to_string(),
            due_back: other.due_back,
            loan_status: other.loan_status,
            borrower_id: other.borrower_id.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BookInstanceDto> for BookInstanceEntity {
    fn from(other: &BookInstanceDto) -> Self {
        Self {
            instance_id: other.instance_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            book_id: other.book_id.to_string(),
            imprint: other.imprint.to_string(),
            due_back: other.due_back,
            due_sort: due_sort_key(other.due_back),
            loan_status: other.loan_status,
            borrower_id: other.borrower_id.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

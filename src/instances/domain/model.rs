use chrono::{NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::LoanStatus;
use crate::instances::domain::due_sort_key;
use crate::utils::date::serializer;

// BookInstanceEntity is one physical copy of a book that can be borrowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookInstanceEntity {
    pub instance_id: String,
    pub version: i64,
    pub branch_id: String,
    pub book_id: String,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub due_sort: String,
    pub loan_status: LoanStatus,
    pub borrower_id: Option<String>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookInstanceEntity {
    pub fn new(branch_id: &str, book_id: &str, imprint: &str) -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            book_id: book_id.to_string(),
            imprint: imprint.to_string(),
            due_back: None,
            due_sort: due_sort_key(None),
            loan_status: LoanStatus::default(),
            borrower_id: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn set_due_back(&mut self, due_back: Option<NaiveDate>) {
        self.due_back = due_back;
        self.due_sort = due_sort_key(due_back);
    }
}

impl Identifiable for BookInstanceEntity {
    fn id(&self) -> String {
        self.instance_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::core::library::LoanStatus;
    use crate::instances::domain::model::BookInstanceEntity;

    #[tokio::test]
    async fn test_should_build_instance_in_maintenance() {
        let mut instance = BookInstanceEntity::new("test", "book-1", "Ace, 1990");
        assert_eq!(LoanStatus::Maintenance, instance.loan_status);
        assert_eq!(None, instance.due_back);
        instance.set_due_back(NaiveDate::from_ymd_opt(2024, 1, 29));
        assert_eq!("2024-01-29", instance.due_sort.as_str());
    }
}

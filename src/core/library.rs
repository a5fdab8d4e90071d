use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    // caller is not authenticated
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    // caller is authenticated but lacks the capability for the action
    NotGranted {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // Throttled or temporarily failing store; the caller can retry with or without a backoff.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn not_granted(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::NotGranted { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    // classifies a failed store call from its retry flag and http status
    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            LibraryError::unavailable(
                format!("store unavailable {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                LibraryError::not_found(
                    format!("not found {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("403") {
                LibraryError::access_denied(
                    format!("store access denied {:?} {:?}", message, reason).as_str(), reason)
            } else {
                LibraryError::database(
                    format!("store error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            LibraryError::database(
                format!("store error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::AccessDenied { .. } => { false }
            LibraryError::NotGranted { .. } => { false }
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            LibraryError::Validation { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Runtime { .. } => { false }
        }
    }

    pub fn reason_code(&self) -> Option<&str> {
        match self {
            LibraryError::Database { reason_code, .. } |
            LibraryError::AccessDenied { reason_code, .. } |
            LibraryError::NotGranted { reason_code, .. } |
            LibraryError::CurrentlyUnavailable { reason_code, .. } |
            LibraryError::Validation { reason_code, .. } |
            LibraryError::Runtime { reason_code, .. } => reason_code.as_deref(),
            LibraryError::DuplicateKey { .. } |
            LibraryError::NotFound { .. } |
            LibraryError::Serialization { .. } => None,
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::AccessDenied { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::NotGranted { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

/// A specialized Result type for catalog and loan operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

// One page of an ordered listing; resume from `next_page` to continue the sequence.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResult<T> {
    // The page token this result was fetched with
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // token of the following page, if any
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }

    pub(crate) fn map<'a, U, F: FnMut(&'a T) -> U>(&'a self, f: F) -> PaginatedResult<U> {
        PaginatedResult {
            page: self.page.clone(),
            page_size: self.page_size,
            next_page: self.next_page.clone(),
            records: self.records.iter().map(f).collect(),
        }
    }
}

// Availability of a borrowable copy of a book. Accepts the name or the one-letter code.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub(crate) enum LoanStatus {
    #[default]
    Maintenance,
    OnLoan,
    Available,
    Reserved,
}

impl LoanStatus {
    pub const ALL: [LoanStatus; 4] = [LoanStatus::Maintenance, LoanStatus::OnLoan, LoanStatus::Available, LoanStatus::Reserved];

    pub fn code(&self) -> char {
        match self {
            LoanStatus::Maintenance => 'm',
            LoanStatus::OnLoan => 'o',
            LoanStatus::Available => 'a',
            LoanStatus::Reserved => 'r',
        }
    }

    // due_back only carries meaning while the copy is out or held
    pub fn tracks_due_date(&self) -> bool {
        matches!(self, LoanStatus::OnLoan | LoanStatus::Reserved)
    }

    pub fn is_overdue(&self, due_back: Option<NaiveDate>, today: NaiveDate) -> bool {
        match due_back {
            Some(due) => *self == LoanStatus::OnLoan && due < today,
            None => false,
        }
    }
}

impl TryFrom<String> for LoanStatus {
    type Error = LibraryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        LoanStatus::ALL.into_iter()
            .find(|status| status.to_string() == s || (s.len() == 1 && s.starts_with(status.code())))
            .ok_or_else(|| LibraryError::validation(
                format!("unknown loan status {}", s).as_str(), Some("loan_status".to_string())))
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LoanStatus::Maintenance => write!(f, "Maintenance"),
            LoanStatus::OnLoan => write!(f, "OnLoan"),
            LoanStatus::Available => write!(f, "Available"),
            LoanStatus::Reserved => write!(f, "Reserved"),
        }
    }
}

// Capabilities a patron account can be granted.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Permission {
    CanMarkReturned,
}

impl Permission {
    pub fn parse(s: &str) -> Option<Permission> {
        match s.trim() {
            "can_mark_returned" | "catalog.can_mark_returned" => Some(Permission::CanMarkReturned),
            _ => None,
        }
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Permission::CanMarkReturned => write!(f, "can_mark_returned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::core::library::{LibraryError, LoanStatus, PaginatedResult, Permission};

    #[tokio::test]
    async fn test_should_create_database_error() {
        assert!(matches!(LibraryError::database("test", None, false), LibraryError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_access_errors() {
        assert!(matches!(LibraryError::access_denied("test", None), LibraryError::AccessDenied{ message: _, reason_code: _ }));
        assert!(matches!(LibraryError::not_granted("test", None), LibraryError::NotGranted{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_validation_error_with_reason() {
        let err = LibraryError::validation("renewal in past", Some("PastDateError".to_string()));
        assert_eq!(Some("PastDateError"), err.reason_code());
        assert!(!err.retryable());
    }

    #[tokio::test]
    async fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(LibraryError::database_or_unavailable("test", None, true), LibraryError::CurrentlyUnavailable{ .. }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("404".to_string()), false), LibraryError::NotFound{ .. }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("403".to_string()), false), LibraryError::AccessDenied{ .. }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("500".to_string()), false), LibraryError::Database{ .. }));
        assert!(matches!(LibraryError::database_or_unavailable("test", None, false), LibraryError::Database{ .. }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert_eq!(false, LibraryError::database("test", None, false).retryable());
        assert_eq!(false, LibraryError::not_found("test").retryable());
        assert_eq!(false, LibraryError::unavailable("test", None, false).retryable());
        assert_eq!(true, LibraryError::unavailable("test", None, true).retryable());
        assert_eq!(false, LibraryError::runtime("test", None).retryable());
    }

    #[tokio::test]
    async fn test_should_parse_loan_status_by_name_and_code() {
        for status in LoanStatus::ALL {
            assert_eq!(status, LoanStatus::try_from(status.to_string()).expect("name"));
            assert_eq!(status, LoanStatus::try_from(status.code().to_string()).expect("code"));
        }
        let err = LoanStatus::try_from("bogus".to_string()).expect_err("should reject");
        assert!(matches!(err, LibraryError::Validation { .. }));
        assert_eq!(LoanStatus::OnLoan, serde_json::from_str::<LoanStatus>("\"o\"").expect("code in json"));
        assert!(serde_json::from_str::<LoanStatus>("\"lost\"").is_err());
        assert_eq!(LoanStatus::Maintenance, LoanStatus::default());
    }

    #[tokio::test]
    async fn test_should_flag_overdue_only_on_loan() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let past = NaiveDate::from_ymd_opt(2024, 1, 9);
        assert!(LoanStatus::OnLoan.is_overdue(past, today));
        assert!(!LoanStatus::OnLoan.is_overdue(Some(today), today));
        assert!(!LoanStatus::Reserved.is_overdue(past, today));
        assert!(!LoanStatus::OnLoan.is_overdue(None, today));
        assert!(LoanStatus::Reserved.tracks_due_date());
        assert!(!LoanStatus::Available.tracks_due_date());
    }

    #[tokio::test]
    async fn test_should_parse_permission() {
        assert_eq!(Some(Permission::CanMarkReturned), Permission::parse(" can_mark_returned"));
        assert_eq!(Some(Permission::CanMarkReturned), Permission::parse("catalog.can_mark_returned"));
        assert_eq!(None, Permission::parse("can_delete"));
        assert_eq!("can_mark_returned", Permission::CanMarkReturned.to_string());
    }

    #[tokio::test]
    async fn test_should_map_paginated_result() {
        let page = PaginatedResult::new(Some("0"), 2, Some("2".to_string()), vec![1, 2]);
        let mapped = page.map(|n| n * 10);
        assert_eq!(vec![10, 20], mapped.records);
        assert_eq!(Some("2".to_string()), mapped.next_page);
    }
}

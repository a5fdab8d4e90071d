use crate::core::library::{LibraryError, LibraryResult};

pub mod model;

pub(crate) const ISBN_MAX_LEN: usize = 13;
pub(crate) const TITLE_MAX_LEN: usize = 200;
pub(crate) const SUMMARY_MAX_LEN: usize = 1000;

// title is required, the ISBN is at most 13 characters and the summary is optional
pub(crate) fn validate_book(title: &str, isbn: &str, summary: &str) -> LibraryResult<()> {
    if title.trim().is_empty() || title.chars().count() > TITLE_MAX_LEN {
        return Err(LibraryError::validation(
            format!("book title must have 1 to {} characters", TITLE_MAX_LEN).as_str(), Some("title".to_string())));
    }
    if isbn.trim().is_empty() || isbn.chars().count() > ISBN_MAX_LEN {
        return Err(LibraryError::validation(
            format!("isbn must have 1 to {} characters", ISBN_MAX_LEN).as_str(), Some("isbn".to_string())));
    }
    if summary.chars().count() > SUMMARY_MAX_LEN {
        return Err(LibraryError::validation(
            format!("summary must have at most {} characters", SUMMARY_MAX_LEN).as_str(), Some("summary".to_string())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::books::domain::{validate_book, SUMMARY_MAX_LEN, TITLE_MAX_LEN};
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_validate_book() {
        assert!(validate_book("Dune", "9780441013593", "").is_ok());
        assert!(validate_book(" ", "9780441013593", "").is_err());
        assert!(validate_book("Dune", "97804410135930", "").is_err());
        assert!(validate_book("Dune", "", "").is_err());
    }

    #[tokio::test]
    async fn test_should_limit_title_and_summary_length() {
        let title = "t".repeat(TITLE_MAX_LEN);
        let summary = "s".repeat(SUMMARY_MAX_LEN);
        assert!(validate_book(title.as_str(), "9780441013593", summary.as_str()).is_ok());

        let long_title = "t".repeat(TITLE_MAX_LEN + 1);
        match validate_book(long_title.as_str(), "9780441013593", "") {
            Err(LibraryError::Validation { reason_code, .. }) => assert_eq!(Some("title".to_string()), reason_code),
            other => panic!("unexpected {:?}", other),
        }
        let long_summary = "s".repeat(SUMMARY_MAX_LEN + 1);
        match validate_book("Dune", "9780441013593", long_summary.as_str()) {
            Err(LibraryError::Validation { reason_code, .. }) => assert_eq!(Some("summary".to_string()), reason_code),
            other => panic!("unexpected {:?}", other),
        }
    }
}

use crate::core::library::{LibraryError, LibraryResult};

pub mod model;

pub(crate) const NAME_MAX_LEN: usize = 100;

// Authors are ordered by last name, then first name; the two are folded into one
// sortable key so a single index range key can express that order.
pub(crate) fn sort_key(last_name: &str, first_name: &str) -> String {
    format!("{}\u{1}{}", last_name, first_name)
}

// both names are required and each is at most 100 characters
pub(crate) fn validate_author(first_name: &str, last_name: &str) -> LibraryResult<()> {
    for (field, name) in [("first_name", first_name), ("last_name", last_name)] {
        if name.trim().is_empty() || name.chars().count() > NAME_MAX_LEN {
            return Err(LibraryError::validation(
                format!("author {} must have 1 to {} characters", field, NAME_MAX_LEN).as_str(), Some(field.to_string())));
        }
    }
    Ok(())
}

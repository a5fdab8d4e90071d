use crate::core::library::{LibraryError, LibraryResult};

pub mod model;

pub(crate) const NAME_MAX_LEN: usize = 200;

pub(crate) fn validate_genre(name: &str) -> LibraryResult<()> {
    if name.trim().is_empty() || name.chars().count() > NAME_MAX_LEN {
        return Err(LibraryError::validation(
            format!("genre name must have 1 to {} characters", NAME_MAX_LEN).as_str(), Some("name".to_string())));
    }
    Ok(())
}

use crate::auth::guard::{authorize, LoginRequired, PermissionRequired};
use crate::auth::principal::Principal;
use crate::core::library::{LibraryResult, Permission};

pub mod add_author_cmd;
pub mod add_book_cmd;
pub mod add_genre_cmd;
pub mod add_instance_cmd;
pub mod add_patron_cmd;
pub mod author_detail_cmd;
pub mod book_detail_cmd;
pub mod catalog_summary_cmd;
pub mod get_author_cmd;
pub mod get_book_cmd;
pub mod get_instance_cmd;
pub mod get_patron_cmd;
pub mod list_authors_cmd;
pub mod list_books_cmd;
pub mod list_genres_cmd;
pub mod remove_author_cmd;
pub mod remove_book_cmd;
pub mod update_author_cmd;
pub mod update_book_cmd;
pub mod update_instance_cmd;

// catalog changes are made by library staff
pub(crate) fn require_librarian(principal: &Principal) -> LibraryResult<()> {
    authorize(principal, &[&LoginRequired, &PermissionRequired(Permission::CanMarkReturned)])
}

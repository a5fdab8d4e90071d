use serde::{Deserialize, Serialize};
use crate::instances::dto::BookInstanceDto;
use crate::patrons::dto::PatronDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BorrowerDto {
    pub patron_id: String,
    pub username: String,
    pub display_name: String,
}

impl From<&PatronDto> for BorrowerDto {
    fn from(other: &PatronDto) -> Self {
        Self {
            patron_id: other.patron_id.to_string(),
            username: other.username.to_string(),
            display_name: other.display_name(),
        }
    }
}

// LoanDto is a borrowed copy together with its title and borrower for the librarian view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct LoanDto {
    pub instance: BookInstanceDto,
    pub book_title: String,
    // "<instance id> (<book title>)"
    pub display: String,
    pub borrower: Option<BorrowerDto>,
}

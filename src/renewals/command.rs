pub mod begin_renewal_cmd;
pub mod renew_book_cmd;

pub mod guard;
pub mod principal;

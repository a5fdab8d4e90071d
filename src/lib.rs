pub mod core;
pub mod utils;
pub mod gateway;
pub mod auth;
pub mod genres;
pub mod authors;
pub mod books;
pub mod instances;
pub mod patrons;
pub mod catalog;
pub mod loans;
pub mod renewals;

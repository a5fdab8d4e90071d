include!("../../lib.rs");
use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use crate::utils::ddb::setup_tracing;
use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
use crate::catalog::controller::{
    add_author, add_book, add_genre, add_instance, add_patron, author_detail, book_detail, catalog_summary,
    find_author_by_id, find_book_by_id, find_book_by_isbn, find_instance_by_id, find_patron_by_id, list_authors,
    list_books, list_genres, remove_author, remove_book, update_author, update_book, update_instance,
};

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = if DEV_MODE {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        let store = std::env::var("LMS_STORE").map(RepositoryStore::from)
            .unwrap_or(RepositoryStore::LocalDynamoDB);
        AppState::new("dev", store)
    } else {
        AppState::new("prod", RepositoryStore::DynamoDB)
    };
    tracing::info!(store = %state.store, branch = state.config.branch_id.as_str(), "starting catalog");

    let app = Router::new()
        .route("/catalog", get(catalog_summary))
        .route("/catalog/books", get(list_books).post(add_book))
        .route("/catalog/books/:id",
               get(find_book_by_id).put(update_book).delete(remove_book))
        .route("/catalog/books/:id/detail", get(book_detail))
        .route("/catalog/isbn/:isbn", get(find_book_by_isbn))
        .route("/catalog/authors", get(list_authors).post(add_author))
        .route("/catalog/authors/:id",
               get(find_author_by_id).put(update_author).delete(remove_author))
        .route("/catalog/authors/:id/detail", get(author_detail))
        .route("/catalog/genres", get(list_genres).post(add_genre))
        .route("/catalog/instances", post(add_instance))
        .route("/catalog/instances/:id", get(find_instance_by_id).put(update_instance))
        .route("/catalog/patrons", post(add_patron))
        .route("/catalog/patrons/:id", get(find_patron_by_id))
        .with_state(state);

    run(app).await
}

include!("../../lib.rs");
use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use crate::utils::ddb::setup_tracing;
use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
use crate::loans::controller::{list_all_loans, list_instances, list_my_loans};
use crate::renewals::controller::{begin_renewal, renew_book, renew_book_model};

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
    tracing::info!(store = %state.store, branch = state.config.branch_id.as_str(), "starting loans");

    let app = Router::new()
        .route("/loans", get(list_all_loans))
        .route("/loans/mine", get(list_my_loans))
        .route("/loans/instances", get(list_instances))
        .route("/loans/:id/renew", get(begin_renewal).post(renew_book))
        .route("/loans/:id/renew/model", post(renew_book_model))
        .with_state(state);

    run(app).await
}

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub(crate) struct AppState {
    pub(crate) config: Configuration,
    pub(crate) store: RepositoryStore,
}

impl AppState {
    pub fn new(branch: &str, store: RepositoryStore) -> AppState {
        AppState {
            config: Configuration::new(branch),
            store,
        }
    }
}

// ?page=<token> on listing routes
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageQuery {
    pub page: Option<String>,
}

pub(crate) type ServerError = (StatusCode, String);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, format!("{}", err))
}

pub(crate) fn status_of(err: &CommandError) -> StatusCode {
    match err {
        CommandError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
        CommandError::Forbidden { .. } => StatusCode::FORBIDDEN,
        CommandError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        CommandError::DuplicateKey { .. } => StatusCode::CONFLICT,
        CommandError::NotFound { .. } => StatusCode::NOT_FOUND,
        CommandError::Runtime { retryable: true, .. } => StatusCode::SERVICE_UNAVAILABLE,
        CommandError::Runtime { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        CommandError::Serialization { .. } => StatusCode::BAD_REQUEST,
        CommandError::Validation { .. } => StatusCode::BAD_REQUEST,
        CommandError::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let body = serde_json::to_string(&err).unwrap_or_else(|_| format!("{:?}", err));
        (status_of(&err), body)
    }
}

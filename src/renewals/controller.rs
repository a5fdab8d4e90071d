use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use crate::auth::principal::Principal;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::renewals::command::begin_renewal_cmd::{BeginRenewalCommand, BeginRenewalCommandRequest};
use crate::renewals::command::renew_book_cmd::{RenewalSubmission, RenewBookCommand, RenewBookCommandRequest};
use crate::renewals::domain::{RenewalService, RenewalState};
use crate::renewals::factory;

async fn build_service(state: AppState) -> Box<dyn RenewalService> {
    factory::create_renewal_service(&state.config, state.store).await
}

// Completed redirects to the borrowed list, a rejected date comes back with its error
pub(crate) fn renewal_response(state: RenewalState) -> Response {
    let (status, location) = match &state {
        RenewalState::Completed { redirect, .. } => (StatusCode::SEE_OTHER, Some(redirect.path())),
        RenewalState::Submitted { .. } => (StatusCode::BAD_REQUEST, None),
        RenewalState::AwaitingInput { .. } => (StatusCode::OK, None),
    };
    match location {
        Some(location) => (status, [(header::LOCATION, location)], Json(state)).into_response(),
        None => (status, Json(state)).into_response(),
    }
}

pub(crate) async fn begin_renewal(
    State(state): State<AppState>,
    principal: Principal,
    Path(instance_id): Path<String>) -> Result<Json<RenewalState>, ServerError> {
    let req = BeginRenewalCommandRequest { principal, instance_id };
    let svc = build_service(state).await;
    let res = BeginRenewalCommand::new(svc).execute(req).await?;
    Ok(Json(res.state))
}

pub(crate) async fn renew_book(
    State(state): State<AppState>,
    principal: Principal,
    Path(instance_id): Path<String>,
    json: Json<Value>) -> Result<Response, ServerError> {
    let form = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    submit(state, principal, instance_id, RenewalSubmission::Form(form)).await
}

pub(crate) async fn renew_book_model(
    State(state): State<AppState>,
    principal: Principal,
    Path(instance_id): Path<String>,
    json: Json<Value>) -> Result<Response, ServerError> {
    let form = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    submit(state, principal, instance_id, RenewalSubmission::Model(form)).await
}

async fn submit(state: AppState, principal: Principal, instance_id: String,
                submission: RenewalSubmission) -> Result<Response, ServerError> {
    let req = RenewBookCommandRequest { principal, instance_id, submission };
    let svc = build_service(state).await;
    let res = RenewBookCommand::new(svc).execute(req).await?;
    Ok(renewal_response(res.state))
}

#[cfg(test)]
mod tests {
    use axum::extract::{Path, State};
    use axum::http::{header, StatusCode};
    use axum::response::Response;
    use chrono::{Duration, NaiveDate, Utc};
    use serde_json::json;
    use crate::auth::principal::Principal;
    use crate::core::controller::{AppState, ServerError};
    use crate::core::library::{LoanStatus, Permission};
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::instances::domain::model::BookInstanceEntity;
    use crate::instances::dto::BookInstanceDto;
    use crate::instances::factory::create_instance_repository;
    use crate::renewals::controller::{begin_renewal, renew_book, renew_book_model, renewal_response};
    use crate::renewals::domain::{RedirectTarget, RenewalState};
    use crate::renewals::forms::FormError;
    use crate::renewals::validator::RenewalError;

    #[tokio::test]
    async fn test_should_redirect_completed_renewal() {
        let state = RenewalState::Completed {
            instance: BookInstanceDto::new("test", "book-1", "imprint"),
            redirect: RedirectTarget::AllBorrowed,
        };
        let res = renewal_response(state);
        assert_eq!(StatusCode::SEE_OTHER, res.status());
        assert_eq!("/loans", res.headers().get(header::LOCATION).expect("location").to_str().unwrap());
    }

    #[tokio::test]
    async fn test_should_answer_bad_request_for_rejected_date() {
        let state = RenewalState::Submitted {
            instance_id: "i1".to_string(),
            proposed_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            error: FormError::new("renewal_date", RenewalError::PastDate),
        };
        assert_eq!(StatusCode::BAD_REQUEST, renewal_response(state).status());
    }

    fn status_of(res: &Result<Response, ServerError>) -> StatusCode {
        match res {
            Ok(res) => res.status(),
            Err((status, _)) => *status,
        }
    }

    #[tokio::test]
    async fn test_should_serve_renewal_routes() {
        let state = AppState::new("renewals-controller", RepositoryStore::InMemory);
        let librarian = Principal::user("librarian", &[Permission::CanMarkReturned]);
        let repo = create_instance_repository(&state.config, RepositoryStore::InMemory).await;
        let today = Utc::now().date_naive();
        let mut instance = BookInstanceEntity::new("renewals-controller", "book-1", "Ace");
        instance.loan_status = LoanStatus::OnLoan;
        instance.borrower_id = Some("p1".to_string());
        instance.set_due_back(Some(today));
        repo.create(&instance).await.expect("should create instance");
        let id = instance.instance_id.clone();
        let proposed = today + Duration::days(7);

        let res = renew_book(State(state.clone()), Principal::anonymous(), Path(id.clone()),
                             axum::Json(json!({"renewal_date": proposed.to_string()}))).await;
        assert_eq!(StatusCode::UNAUTHORIZED, status_of(&res));
        let res = renew_book(State(state.clone()), Principal::user("p1", &[]), Path(id.clone()),
                             axum::Json(json!({"renewal_date": proposed.to_string()}))).await;
        assert_eq!(StatusCode::FORBIDDEN, status_of(&res));
        let res = renew_book(State(state.clone()), librarian.clone(), Path(id.clone()),
                             axum::Json(json!({"renewal_date": "not-a-date"}))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status_of(&res));
        let res = renew_book(State(state.clone()), librarian.clone(), Path("missing".to_string()),
                             axum::Json(json!({"renewal_date": proposed.to_string()}))).await;
        assert_eq!(StatusCode::NOT_FOUND, status_of(&res));

        let begun = begin_renewal(State(state.clone()), librarian.clone(), Path(id.clone()))
            .await.expect("should begin");
        assert!(matches!(begun.0, RenewalState::AwaitingInput { .. }));

        let past = today - Duration::days(1);
        let res = renew_book_model(State(state.clone()), librarian.clone(), Path(id.clone()),
                                   axum::Json(json!({"due_back": past.to_string()}))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status_of(&res));
        assert_eq!(Some(today), repo.get(id.as_str()).await.expect("should load").due_back);

        let res = renew_book(State(state.clone()), librarian, Path(id.clone()),
                             axum::Json(json!({"renewal_date": proposed.to_string()}))).await;
        assert_eq!(StatusCode::SEE_OTHER, status_of(&res));
        let res = res.expect("should redirect");
        assert_eq!("/loans", res.headers().get(header::LOCATION).expect("location").to_str().unwrap());
        assert_eq!(Some(proposed), repo.get(id.as_str()).await.expect("should load").due_back);
    }
}

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use crate::auth::principal::Principal;
use crate::core::command::Command;
use crate::core::controller::{AppState, PageQuery, ServerError};
use crate::core::library::PaginatedResult;
use crate::instances::dto::BookInstanceDto;
use crate::loans::command::list_all_loans_cmd::{ListAllLoansCommand, ListAllLoansCommandRequest};
use crate::loans::command::list_instances_cmd::{ListInstancesCommand, ListInstancesCommandRequest};
use crate::loans::command::list_my_loans_cmd::{ListMyLoansCommand, ListMyLoansCommandRequest};
use crate::loans::domain::LoanService;
use crate::loans::dto::LoanDto;
use crate::loans::factory;

// ?page=<token>&book_id=<id> on the instance listing
#[derive(Debug, Default, Deserialize)]
pub(crate) struct InstanceQuery {
    pub page: Option<String>,
    pub book_id: Option<String>,
}

async fn build_service(state: &AppState) -> Box<dyn LoanService> {
    factory::create_loan_service(&state.config, state.store).await
}

pub(crate) async fn list_my_loans(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<PageQuery>) -> Result<Json<PaginatedResult<BookInstanceDto>>, ServerError> {
    let svc = build_service(&state).await;
    let res = ListMyLoansCommand::new(svc, state.config.page_size)
        .execute(ListMyLoansCommandRequest { principal, page: query.page }).await?;
    Ok(Json(res.loans))
}

pub(crate) async fn list_all_loans(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<PageQuery>) -> Result<Json<PaginatedResult<LoanDto>>, ServerError> {
    let svc = build_service(&state).await;
    let res = ListAllLoansCommand::new(svc, state.config.page_size)
        .execute(ListAllLoansCommandRequest { principal, page: query.page }).await?;
    Ok(Json(res.loans))
}

pub(crate) async fn list_instances(
    State(state): State<AppState>,
    Query(query): Query<InstanceQuery>) -> Result<Json<PaginatedResult<BookInstanceDto>>, ServerError> {
    let svc = build_service(&state).await;
    let res = ListInstancesCommand::new(svc, state.config.page_size)
        .execute(ListInstancesCommandRequest { page: query.page, book_id: query.book_id }).await?;
    Ok(Json(res.instances))
}

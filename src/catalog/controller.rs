use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use crate::auth::principal::Principal;
use crate::authors::dto::AuthorDto;
use crate::books::dto::BookDto;
use crate::catalog::command::add_author_cmd::{AddAuthorCommand, AddAuthorCommandRequest, AddAuthorCommandResponse};
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::add_genre_cmd::{AddGenreCommand, AddGenreCommandRequest, AddGenreCommandResponse};
use crate::catalog::command::add_instance_cmd::{AddInstanceCommand, AddInstanceCommandRequest, AddInstanceCommandResponse};
use crate::catalog::command::add_patron_cmd::{AddPatronCommand, AddPatronCommandRequest, AddPatronCommandResponse};
use crate::catalog::command::author_detail_cmd::{AuthorDetailCommand, AuthorDetailCommandRequest};
use crate::catalog::command::book_detail_cmd::{BookDetailCommand, BookDetailCommandRequest};
use crate::catalog::command::catalog_summary_cmd::{CatalogSummaryCommand, CatalogSummaryCommandRequest};
use crate::catalog::command::get_author_cmd::{GetAuthorCommand, GetAuthorCommandRequest, GetAuthorCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::get_instance_cmd::{GetInstanceCommand, GetInstanceCommandRequest, GetInstanceCommandResponse};
use crate::catalog::command::get_patron_cmd::{GetPatronCommand, GetPatronCommandRequest, GetPatronCommandResponse};
use crate::catalog::command::list_authors_cmd::{ListAuthorsCommand, ListAuthorsCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::list_genres_cmd::{ListGenresCommand, ListGenresCommandRequest};
use crate::catalog::command::remove_author_cmd::{RemoveAuthorCommand, RemoveAuthorCommandRequest, RemoveAuthorCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest, RemoveBookCommandResponse};
use crate::catalog::command::update_author_cmd::{UpdateAuthorCommand, UpdateAuthorCommandRequest, UpdateAuthorCommandResponse};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest, UpdateBookCommandResponse};
use crate::catalog::command::update_instance_cmd::{UpdateInstanceCommand, UpdateInstanceCommandRequest, UpdateInstanceCommandResponse};
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::{AuthorDetailDto, BookDetailDto, BookListingDto, CatalogSummary};
use crate::catalog::factory;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, PageQuery, ServerError};
use crate::core::library::PaginatedResult;
use crate::genres::dto::GenreDto;
use crate::instances::dto::BookInstanceDto;

async fn build_service(state: AppState) -> Box<dyn CatalogService> {
    factory::create_catalog_service(&state.config, state.store).await
}

// the path id wins over any id in the body
fn path_mismatch(path_id: &str, body_id: &str) -> Result<(), ServerError> {
    if path_id != body_id {
        return Err((StatusCode::BAD_REQUEST, format!("id {} does not match path {}", body_id, path_id)));
    }
    Ok(())
}

pub(crate) async fn catalog_summary(
    State(state): State<AppState>) -> Result<Json<CatalogSummary>, ServerError> {
    let svc = build_service(state).await;
    let res = CatalogSummaryCommand::new(svc).execute(CatalogSummaryCommandRequest::default()).await?;
    Ok(Json(res.summary))
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    principal: Principal,
    json: Json<Value>) -> Result<(StatusCode, Json<AddBookCommandResponse>), ServerError> {
    let mut req: AddBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.principal = principal;
    let svc = build_service(state).await;
    let res = AddBookCommand::new(svc).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>) -> Result<Json<PaginatedResult<BookListingDto>>, ServerError> {
    let svc = build_service(state).await;
    let res = ListBooksCommand::new(svc).execute(ListBooksCommandRequest { page: query.page }).await?;
    Ok(Json(res.books))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = GetBookCommand::new(svc).execute(GetBookCommandRequest::ById(book_id)).await?;
    Ok(Json(res))
}

pub(crate) async fn find_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = GetBookCommand::new(svc).execute(GetBookCommandRequest::ByIsbn(isbn)).await?;
    Ok(Json(res))
}

pub(crate) async fn book_detail(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<BookDetailDto>, ServerError> {
    let svc = build_service(state).await;
    let res = BookDetailCommand::new(svc).execute(BookDetailCommandRequest { book_id }).await?;
    Ok(Json(res.detail))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    principal: Principal,
    Path(book_id): Path<String>,
    json: Json<Value>) -> Result<Json<UpdateBookCommandResponse>, ServerError> {
    let book: BookDto = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    path_mismatch(book_id.as_str(), book.book_id.as_str())?;
    let svc = build_service(state).await;
    let res = UpdateBookCommand::new(svc).execute(UpdateBookCommandRequest { principal, book }).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    principal: Principal,
    Path(book_id): Path<String>) -> Result<Json<RemoveBookCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = RemoveBookCommand::new(svc).execute(RemoveBookCommandRequest { principal, book_id }).await?;
    Ok(Json(res))
}

pub(crate) async fn add_author(
    State(state): State<AppState>,
    principal: Principal,
    json: Json<Value>) -> Result<(StatusCode, Json<AddAuthorCommandResponse>), ServerError> {
    let mut req: AddAuthorCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.principal = principal;
    let svc = build_service(state).await;
    let res = AddAuthorCommand::new(svc).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>) -> Result<Json<PaginatedResult<AuthorDto>>, ServerError> {
    let svc = build_service(state).await;
    let res = ListAuthorsCommand::new(svc).execute(ListAuthorsCommandRequest { page: query.page }).await?;
    Ok(Json(res.authors))
}

pub(crate) async fn find_author_by_id(
    State(state): State<AppState>,
    Path(author_id): Path<String>) -> Result<Json<GetAuthorCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = GetAuthorCommand::new(svc).execute(GetAuthorCommandRequest { author_id }).await?;
    Ok(Json(res))
}

pub(crate) async fn author_detail(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
    Query(query): Query<PageQuery>) -> Result<Json<AuthorDetailDto>, ServerError> {
    let svc = build_service(state).await;
    let res = AuthorDetailCommand::new(svc).execute(AuthorDetailCommandRequest { author_id, page: query.page }).await?;
    Ok(Json(res.detail))
}

pub(crate) async fn update_author(
    State(state): State<AppState>,
    principal: Principal,
    Path(author_id): Path<String>,
    json: Json<Value>) -> Result<Json<UpdateAuthorCommandResponse>, ServerError> {
    let author: AuthorDto = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    path_mismatch(author_id.as_str(), author.author_id.as_str())?;
    let svc = build_service(state).await;
    let res = UpdateAuthorCommand::new(svc).execute(UpdateAuthorCommandRequest { principal, author }).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_author(
    State(state): State<AppState>,
    principal: Principal,
    Path(author_id): Path<String>) -> Result<Json<RemoveAuthorCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = RemoveAuthorCommand::new(svc).execute(RemoveAuthorCommandRequest { principal, author_id }).await?;
    Ok(Json(res))
}

pub(crate) async fn add_genre(
    State(state): State<AppState>,
    principal: Principal,
    json: Json<Value>) -> Result<(StatusCode, Json<AddGenreCommandResponse>), ServerError> {
    let mut req: AddGenreCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.principal = principal;
    let svc = build_service(state).await;
    let res = AddGenreCommand::new(svc).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn list_genres(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>) -> Result<Json<PaginatedResult<GenreDto>>, ServerError> {
    let svc = build_service(state).await;
    let res = ListGenresCommand::new(svc).execute(ListGenresCommandRequest { page: query.page }).await?;
    Ok(Json(res.genres))
}

pub(crate) async fn add_instance(
    State(state): State<AppState>,
    principal: Principal,
    json: Json<Value>) -> Result<(StatusCode, Json<AddInstanceCommandResponse>), ServerError> {
    let mut req: AddInstanceCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.principal = principal;
    let svc = build_service(state).await;
    let res = AddInstanceCommand::new(svc).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn find_instance_by_id(
    State(state): State<AppState>,
    Path(instance_id): Path<String>) -> Result<Json<GetInstanceCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = GetInstanceCommand::new(svc).execute(GetInstanceCommandRequest { instance_id }).await?;
    Ok(Json(res))
}

pub(crate) async fn update_instance(
    State(state): State<AppState>,
    principal: Principal,
    Path(instance_id): Path<String>,
    json: Json<Value>) -> Result<Json<UpdateInstanceCommandResponse>, ServerError> {
    let instance: BookInstanceDto = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    path_mismatch(instance_id.as_str(), instance.instance_id.as_str())?;
    let svc = build_service(state).await;
    let res = UpdateInstanceCommand::new(svc).execute(UpdateInstanceCommandRequest { principal, instance }).await?;
    Ok(Json(res))
}

pub(crate) async fn add_patron(
    State(state): State<AppState>,
    principal: Principal,
    json: Json<Value>) -> Result<(StatusCode, Json<AddPatronCommandResponse>), ServerError> {
    let mut req: AddPatronCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.principal = principal;
    let svc = build_service(state).await;
    let res = AddPatronCommand::new(svc).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn find_patron_by_id(
    State(state): State<AppState>,
    principal: Principal,
    Path(patron_id): Path<String>) -> Result<Json<GetPatronCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = GetPatronCommand::new(svc).execute(GetPatronCommandRequest { principal, patron_id }).await?;
    Ok(Json(res))
}

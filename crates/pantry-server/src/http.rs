use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use pantry_model::{CreateListRequest, DeletedList, Item, ListResponse};
use serde::Serialize;

use crate::service::ApiError;

pub use crate::service::AppState;

/// Health endpoint path.
pub const HEALTH_PATH: &str = "/health";
/// List collection endpoint path.
pub const LISTS_PATH: &str = "/api/v1/lists";
/// Single list endpoint path.
pub const LIST_PATH: &str = "/api/v1/lists/:list_id";
/// List items collection endpoint path.
pub const LIST_ITEMS_PATH: &str = "/api/v1/lists/:list_id/items";
/// Single list item endpoint path.
pub const LIST_ITEM_PATH: &str = "/api/v1/lists/:list_id/items/:barcode";
/// Catalog search endpoint path.
pub const SEARCH_PATH: &str = "/api/v1/search/:query";

/// Ceiling on lists returned by the collection endpoint. A fixed cap,
/// not pagination.
pub const LIST_RETURN_LIMIT: usize = 10;

/// Build health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route(HEALTH_PATH, get(health))
}

/// Build list management routes.
pub fn list_routes() -> Router<AppState> {
    Router::new()
        .route(LISTS_PATH, get(get_lists).post(create_list))
        .route(LIST_PATH, delete(delete_list))
        .route(LIST_ITEMS_PATH, post(add_item))
        .route(LIST_ITEM_PATH, delete(remove_item))
}

/// Build catalog search routes.
pub fn search_routes() -> Router<AppState> {
    Router::new().route(SEARCH_PATH, get(search_catalog))
}

/// Assemble the full application router around shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(list_routes())
        .merge(search_routes())
        .fallback(route_not_found)
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    timestamp: String,
    uptime: f64,
}

async fn health(State(st): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: st.started_at.elapsed().as_secs_f64(),
    })
}

async fn get_lists(State(st): State<AppState>) -> Result<Json<Vec<ListResponse>>, ApiError> {
    let lists = st.store.get_all_lists(LIST_RETURN_LIMIT).await?;
    Ok(Json(lists.iter().map(ListResponse::from).collect()))
}

async fn create_list(
    State(st): State<AppState>,
    body: Result<Json<CreateListRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ListResponse>), ApiError> {
    let Json(req) = body.map_err(bad_body)?;
    let list = st.store.create_list(&req.name, req.items).await?;
    Ok((StatusCode::CREATED, Json(ListResponse::from(&list))))
}

async fn delete_list(
    State(st): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Json<DeletedList>, ApiError> {
    st.store.delete_list(&list_id).await?;
    Ok(Json(DeletedList { id: list_id }))
}

async fn add_item(
    State(st): State<AppState>,
    Path(list_id): Path<String>,
    body: Result<Json<Item>, JsonRejection>,
) -> Result<Json<ListResponse>, ApiError> {
    let Json(item) = body.map_err(bad_body)?;
    let list = st.store.add_item(&list_id, item).await?;
    Ok(Json(ListResponse::from(&list)))
}

async fn remove_item(
    State(st): State<AppState>,
    Path((list_id, barcode)): Path<(String, String)>,
) -> Result<Json<ListResponse>, ApiError> {
    let list = st.store.remove_item(&list_id, &barcode).await?;
    Ok(Json(ListResponse::from(&list)))
}

async fn search_catalog(
    State(st): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let items = st.catalog.search(&query).await?;
    Ok(Json(items))
}

/// Malformed request bodies answer 400 in the common error shape.
fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

/// Fallback for unmatched routes. Answers `{error, path}`: this is the
/// router speaking, not an API operation.
async fn route_not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Route not found", "path": uri.to_string() })),
    )
}

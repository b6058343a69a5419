use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pantry_catalog::{CatalogError, CatalogSearch};
use pantry_model::ErrorMessage;
use pantry_store_contract::{ListStore, ListStoreError};
use std::sync::Arc;
use std::time::Instant;

/// Shared state behind every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ListStore>,
    pub catalog: Arc<dyn CatalogSearch>,
    /// Server start time, reported as uptime by the health endpoint.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn ListStore>, catalog: Arc<dyn CatalogSearch>) -> Self {
        Self {
            store,
            catalog,
            started_at: Instant::now(),
        }
    }
}

/// Response-side error for every API operation.
///
/// Display strings go into the `message` field of the error body verbatim.
/// Anything unexpected collapses to a generic 500; the detail stays in the
/// server log and never reaches the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("List was not found. Please try again.")]
    ListNotFound,

    #[error("Item was not found. Please try again.")]
    ItemNotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Search(#[from] CatalogError),

    #[error("Internal server error. Please try again.")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = match &self {
            ApiError::ListNotFound | ApiError::ItemNotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Search(err) => {
                let status = err.status();
                if status >= 500 {
                    tracing::warn!(error = ?err, "catalog search failed");
                }
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(ErrorMessage {
            message: self.to_string(),
        });
        (code, body).into_response()
    }
}

impl From<ListStoreError> for ApiError {
    fn from(e: ListStoreError) -> Self {
        match e {
            // A malformed id can never name a stored list; to the client
            // that is the same missing list.
            ListStoreError::NotFound(_) | ListStoreError::InvalidId(_) => ApiError::ListNotFound,
            ListStoreError::ItemNotFound(_) => ApiError::ItemNotFound,
            ListStoreError::Validation(v) => ApiError::BadRequest(v.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_model::ListValidationError;

    #[test]
    fn store_errors_map_to_fixed_messages() {
        let e: ApiError = ListStoreError::NotFound("x".to_string()).into();
        assert_eq!(e.to_string(), "List was not found. Please try again.");

        let e: ApiError = ListStoreError::InvalidId("not-an-id".to_string()).into();
        assert!(matches!(e, ApiError::ListNotFound));

        let e: ApiError = ListStoreError::ItemNotFound("42".to_string()).into();
        assert_eq!(e.to_string(), "Item was not found. Please try again.");

        let e: ApiError = ListStoreError::Validation(ListValidationError::EmptyName).into();
        assert_eq!(e.to_string(), "List name must contain at least one character");

        let e: ApiError = ListStoreError::Serialization("truncated".to_string()).into();
        assert_eq!(e.to_string(), "Internal server error. Please try again.");
    }

    #[test]
    fn catalog_errors_keep_provider_status_and_message() {
        let e: ApiError = CatalogError::from_status(401).into();
        assert!(matches!(e, ApiError::Search(CatalogError::RateLimited)));
        assert_eq!(e.to_string(), "Please wait a few seconds and then try again!");

        let e: ApiError = CatalogError::from_status(418).into();
        assert!(matches!(e, ApiError::Search(CatalogError::Unexpected(418))));
    }
}

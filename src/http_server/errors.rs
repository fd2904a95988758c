//! # HTTP API Errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::domain::MangaId;
use crate::repository::RepositoryError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by the manga endpoints
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body could not be parsed or failed field validation
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Route id and body id differ on update
    #[error("Route id {route} does not match body id {body}")]
    IdMismatch { route: MangaId, body: MangaId },

    #[error("Manga with id {0} not found")]
    NotFound(MangaId),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Blocking storage task panicked or was cancelled
    #[error("Internal error: {0}")]
    Internal(String),

    /// Status decided by the repository error
    #[error("{0}")]
    Repository(#[from] RepositoryError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Repository(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidBody("missing field".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::IdMismatch { route: 1, body: 2 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound(3).status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_repository_error_propagation() {
        let err = ApiError::from(RepositoryError::NotFound(8));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = ApiError::from(RepositoryError::StorageUnavailable("unset".into()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = ApiError::from(RepositoryError::Io("disk full".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::from(RepositoryError::IdsExhausted(i64::MAX));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

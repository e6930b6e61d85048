//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use opn_core::ValidationIssue;
use serde::Serialize;

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("invalid document: {} issues", .0.len())]
    InvalidDocument(Vec<ValidationIssue>),

    #[error("store error: {0}")]
    Store(#[from] opn_store::StoreError),

    #[error("core error: {0}")]
    Core(#[from] opn_core::Error),
}

impl ApiError {
    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::InvalidDocument(_) => "invalid_document",
            Self::Store(opn_store::StoreError::NotFound(_)) => "not_found",
            Self::Store(_) => "store_error",
            Self::Core(_) => "bad_request",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidDocument(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(e) => match e {
                opn_store::StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Core(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Body returned for rejected profile documents.
#[derive(Debug, Serialize)]
pub struct InvalidDocumentResponse {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        match self {
            Self::InvalidDocument(issues) => (
                status,
                Json(InvalidDocumentResponse {
                    valid: false,
                    issues,
                }),
            )
                .into_response(),
            other => {
                let body = ErrorResponse {
                    code: other.code().to_string(),
                    message: other.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

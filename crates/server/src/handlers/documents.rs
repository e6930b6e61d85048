//! Profile document validation endpoint.

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use opn_core::ProfileDocument;
use serde::Serialize;
use serde_json::Value;

/// Response for an accepted profile document.
#[derive(Debug, Serialize)]
pub struct ValidDocumentResponse {
    pub valid: bool,
    pub profile: ProfileDocument,
}

/// POST /v1/documents/validate
///
/// Checks a profile document and reports every field-level issue.
/// Bodies that are not JSON are rejected as `bad_request`.
pub async fn validate_document(
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ValidDocumentResponse>> {
    let Json(body) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    match opn_core::profile::validate(&body) {
        Ok(profile) => Ok(Json(ValidDocumentResponse {
            valid: true,
            profile,
        })),
        Err(issues) => {
            metrics::DOCUMENT_VALIDATION_FAILURES.inc();
            tracing::debug!(issues = issues.len(), "Profile document rejected");
            Err(ApiError::InvalidDocument(issues))
        }
    }
}

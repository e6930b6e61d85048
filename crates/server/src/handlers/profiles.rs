//! Profile visit endpoints.

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use opn_core::{Username, VISITS_DISPLAY_WIDTH, pad_number};
use opn_store::ProfileRow;
use serde::Serialize;
use time::OffsetDateTime;

/// Profile record as returned to the display layer.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub is_active: bool,
    pub visits: i64,
    /// Zero-padded visit counter for display.
    pub visits_display: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<ProfileRow> for ProfileResponse {
    fn from(row: ProfileRow) -> Self {
        let visits_display = pad_number(u64::try_from(row.visits).unwrap_or(0), VISITS_DISPLAY_WIDTH);
        Self {
            username: row.username,
            is_active: row.is_active,
            visits: row.visits,
            visits_display,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Response for a recorded visit.
#[derive(Debug, Serialize)]
pub struct VisitResponse {
    /// Whether this visit created the profile.
    pub created: bool,
    /// Visit count after this visit.
    pub visits: i64,
}

/// GET /v1/profiles/{username}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<ProfileResponse>> {
    let username = Username::parse(username)?;

    let row = state
        .tracker
        .find_by_username(username.as_str())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("profile '{username}' not found")))?;

    Ok(Json(row.into()))
}

/// POST /v1/profiles/{username}/visits
///
/// Records a visit, creating the profile on first sight.
pub async fn record_visit(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<(StatusCode, Json<VisitResponse>)> {
    let username = Username::parse(username)?;

    let outcome = state
        .tracker
        .increment_or_create_visit(username.as_str())
        .await?;

    metrics::VISITS_RECORDED.inc();
    let status = if outcome.is_created() {
        metrics::PROFILES_CREATED.inc();
        tracing::info!(username = %username, "Profile created");
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(VisitResponse {
            created: outcome.is_created(),
            visits: outcome.visits(),
        }),
    ))
}

/// POST /v1/profiles/{username}/deactivate
///
/// Idempotent; unknown usernames are accepted and nothing is created.
pub async fn deactivate_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<StatusCode> {
    let username = Username::parse(username)?;

    if state.tracker.mark_inactive(username.as_str()).await? {
        metrics::PROFILES_DEACTIVATED.inc();
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_response_pads_visits() {
        let now = OffsetDateTime::now_utc();
        let response = ProfileResponse::from(ProfileRow {
            username: "alice".to_string(),
            is_active: true,
            visits: 42,
            created_at: now,
            updated_at: now,
        });
        assert_eq!(response.visits_display, "0042");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["visits"], 42);
        assert!(json["created_at"].is_string());
    }
}

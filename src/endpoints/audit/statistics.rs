use anyhow::Context;
use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{auth_middleware::User, error::ApiError, services::stats, state::AppState};

pub async fn statistics_by_club(
    State(state): State<AppState>,
    user: User,
) -> Result<impl IntoResponse, ApiError> {
    if !user.is_auditor {
        return Err(ApiError::NoAccess("auditor only".to_owned()));
    }

    let rows = state
        .data
        .transactions
        .statistics_by_club()
        .await
        .context("error querying club statistics")?;

    return Ok(Json(stats::club_review_summaries(rows)));
}

pub async fn my_club_statistics(
    State(state): State<AppState>,
    user: User,
) -> Result<impl IntoResponse, ApiError> {
    let club_name = user
        .club_name
        .ok_or_else(|| ApiError::BadRequest("no club name set".to_owned()))?;

    let counts = state
        .data
        .transactions
        .review_counts_for_club(&club_name)
        .await
        .context("error counting review statuses")?;

    return Ok(Json(json!({
        "club": club_name,
        "completed": counts.completed,
        "in_progress": counts.in_progress,
        "not_reviewed": counts.not_reviewed,
    })));
}

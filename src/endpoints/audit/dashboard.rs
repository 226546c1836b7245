use anyhow::Context;
use axum::{Json, extract::State, response::IntoResponse};

use crate::{auth_middleware::User, error::ApiError, services::stats, state::AppState};

pub async fn dashboard_summary(
    State(state): State<AppState>,
    user: User,
) -> Result<impl IntoResponse, ApiError> {
    if !user.is_auditor {
        return Err(ApiError::NoAccess("auditor only".to_owned()));
    }

    let club_count = state
        .data
        .users
        .count_clubs()
        .await
        .context("error counting clubs")?;

    let review = state
        .data
        .transactions
        .review_counts()
        .await
        .context("error counting review statuses")?;

    let activity = state
        .data
        .transactions
        .activity_by_user()
        .await
        .context("error querying club activity")?;

    let summary = stats::dashboard_summary(club_count, &review, &activity);

    return Ok(Json(summary));
}

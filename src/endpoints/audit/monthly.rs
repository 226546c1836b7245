use anyhow::Context;
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{auth_middleware::User, error::ApiError, services::stats, state::AppState};

pub async fn monthly_summary(
    State(state): State<AppState>,
    user: User,
    Path(club_name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !user.is_auditor {
        return Err(ApiError::NoAccess("auditor only".to_owned()));
    }

    let rows = state
        .data
        .transactions
        .monthly_amounts_for_club(&club_name)
        .await
        .context("error querying monthly amounts")?;

    return Ok(Json(stats::fold_monthly(rows)));
}

pub async fn my_club_monthly_summary(
    State(state): State<AppState>,
    user: User,
) -> Result<impl IntoResponse, ApiError> {
    let club_name = user
        .club_name
        .ok_or_else(|| ApiError::BadRequest("no club name set".to_owned()))?;

    let rows = state
        .data
        .transactions
        .monthly_amounts_for_club(&club_name)
        .await
        .context("error querying monthly amounts")?;

    return Ok(Json(stats::fold_monthly(rows)));
}

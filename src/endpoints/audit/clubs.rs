use anyhow::Context;
use axum::{Json, extract::State, response::IntoResponse};

use crate::{auth_middleware::User, error::ApiError, state::AppState};

pub async fn clubs(
    State(state): State<AppState>,
    user: User,
) -> Result<impl IntoResponse, ApiError> {
    if !user.is_auditor {
        return Err(ApiError::NoAccess("auditor only".to_owned()));
    }

    let clubs = state
        .data
        .users
        .club_names()
        .await
        .context("error querying club names")?;

    Ok(Json(clubs))
}

use anyhow::Context;
use axum::{Json, extract::State, response::IntoResponse};

use crate::{auth_middleware::User, error::ApiError, state::AppState};

pub async fn query(
    State(state): State<AppState>,
    _user: User,
) -> Result<impl IntoResponse, ApiError> {
    let notices = state
        .data
        .notices
        .get_all()
        .await
        .context("error querying notices")?;

    Ok(Json(notices))
}

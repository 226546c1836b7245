use anyhow::Context;
use axum::{Json, extract::State, response::IntoResponse};

use crate::{auth_middleware::User, error::ApiError, state::AppState};

pub async fn query(
    State(state): State<AppState>,
    user: User,
) -> Result<impl IntoResponse, ApiError> {
    let members = state
        .data
        .members
        .get_owned(&user.id)
        .await
        .context("error querying members")?;

    Ok(Json(members))
}

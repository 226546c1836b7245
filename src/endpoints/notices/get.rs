use anyhow::Context;
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{auth_middleware::User, error::ApiError, state::AppState};

pub async fn get_one(
    State(state): State<AppState>,
    _user: User,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let notice = state
        .data
        .notices
        .get_one(&id)
        .await
        .context("error getting notice")?
        .ok_or(ApiError::NotFound("notice not found".to_owned()))?;

    return Ok(Json(notice));
}

use anyhow::Context;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use http::StatusCode;

use crate::{auth_middleware::User, error::ApiError, state::AppState};

pub async fn delete(
    State(state): State<AppState>,
    user: User,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state
        .data
        .members
        .delete(&user.id, &id)
        .await
        .context("error deleting member")?;

    if deleted == 0 {
        return Err(ApiError::NotFound("member not found".to_owned()));
    }

    return Ok(StatusCode::NO_CONTENT);
}

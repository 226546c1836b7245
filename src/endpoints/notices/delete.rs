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
    let existing = state
        .data
        .notices
        .get_one(&id)
        .await
        .context("error getting notice")?
        .ok_or(ApiError::NotFound("notice not found".to_owned()))?;

    if existing.author_id.as_deref() != Some(user.id.as_str()) {
        return Err(ApiError::NoAccess("not your notice".to_owned()));
    }

    let attachment_paths = state
        .data
        .notices
        .delete(&id)
        .await
        .context("error deleting notice")?;

    for path in &attachment_paths {
        state.files.remove(path).await;
    }

    return Ok(StatusCode::NO_CONTENT);
}

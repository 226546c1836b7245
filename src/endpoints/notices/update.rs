use anyhow::{Context, anyhow};
use axum::{
    Json,
    extract::{self, Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{auth_middleware::User, error::ApiError, state::AppState};

#[derive(Deserialize, ToSchema)]
pub struct UpdateNoticeInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

pub async fn update(
    State(state): State<AppState>,
    user: User,
    Path(id): Path<String>,
    extract::Json(payload): extract::Json<UpdateNoticeInput>,
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

    let title = payload.title.unwrap_or(existing.title);
    let content = payload.content.unwrap_or(existing.content);

    if title.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing title".to_string()));
    }

    state
        .data
        .notices
        .update(&id, title.trim(), &content)
        .await
        .context("error updating notice")?;

    let notice = state
        .data
        .notices
        .get_one(&id)
        .await
        .context("error reading back notice")?
        .ok_or_else(|| ApiError::UnexpectedError(anyhow!("updated notice missing")))?;

    return Ok(Json(notice));
}

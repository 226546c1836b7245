use anyhow::{Context, anyhow};
use axum::{
    Json,
    extract::{Multipart, State},
    response::IntoResponse,
};
use http::StatusCode;

use crate::{auth_middleware::User, data::create_id, error::ApiError, state::AppState};

/// Multipart notice: `title`, `content` and any number of `attachments`.
pub async fn create(
    State(state): State<AppState>,
    user: User,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut title = None;
    let mut content = None;
    let mut attachments = Vec::new();

    while let Ok(Some(field)) = multipart.next_field().await {
        if let Some(name) = field.name() {
            match name {
                "title" => title = Some(field.text().await.context("error reading title")?),
                "content" => content = Some(field.text().await.context("error reading content")?),
                "attachments" => {
                    let file_name = field.file_name().unwrap_or("attachment").to_owned();
                    let bytes = field.bytes().await.context("error reading attachment")?;
                    attachments.push((file_name, bytes));
                }
                _ => continue,
            }
        }
    }

    let title = title.ok_or_else(|| ApiError::BadRequest("Missing title".to_string()))?;
    let content = content.ok_or_else(|| ApiError::BadRequest("Missing content".to_string()))?;

    if title.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing title".to_string()));
    }

    let notice_id = create_id();

    state
        .data
        .notices
        .insert(&notice_id, title.trim(), &content, &user.id)
        .await
        .context("error inserting notice")?;

    for (file_name, bytes) in &attachments {
        let path = state
            .files
            .save("notices", file_name, bytes)
            .await
            .context("error saving attachment")?;

        state
            .data
            .notices
            .insert_attachment(&create_id(), &notice_id, &path)
            .await
            .context("error inserting attachment")?;
    }

    let notice = state
        .data
        .notices
        .get_one(&notice_id)
        .await
        .context("error reading back notice")?
        .ok_or_else(|| ApiError::UnexpectedError(anyhow!("inserted notice missing")))?;

    return Ok((StatusCode::CREATED, Json(notice)));
}

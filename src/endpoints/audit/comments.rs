use anyhow::{Context, anyhow};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    response::IntoResponse,
};
use http::StatusCode;

use crate::{auth_middleware::User, data::create_id, error::ApiError, state::AppState};

/// Comments on a transaction are visible to its owner and to auditors.
pub async fn query_comments(
    State(state): State<AppState>,
    user: User,
    Path(transaction_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = state
        .data
        .transactions
        .get_one(&transaction_id)
        .await
        .context("error getting transaction")?
        .ok_or(ApiError::NotFound("transaction not found".to_owned()))?;

    if transaction.user_id != user.id && !user.is_auditor {
        return Err(ApiError::NoAccess("not your transaction".to_owned()));
    }

    let comments = state
        .data
        .audit_comments
        .get_for_transaction(&transaction.id)
        .await
        .context("error querying comments")?;

    return Ok(Json(comments));
}

/// Multipart comment: `content` plus an optional `attachment`. Auditors
/// raise questions, owners answer on their own transactions.
pub async fn create_comment(
    State(state): State<AppState>,
    user: User,
    Path(transaction_id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = state
        .data
        .transactions
        .get_one(&transaction_id)
        .await
        .context("error getting transaction")?
        .ok_or(ApiError::NotFound("transaction not found".to_owned()))?;

    if transaction.user_id != user.id && !user.is_auditor {
        return Err(ApiError::NoAccess("not your transaction".to_owned()));
    }

    let mut content = None;
    let mut attachment = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if let Some(name) = field.name() {
            match name {
                "content" => content = Some(field.text().await.context("error reading content")?),
                "attachment" => {
                    let file_name = field.file_name().unwrap_or("attachment").to_owned();
                    let bytes = field.bytes().await.context("error reading attachment")?;
                    attachment = Some((file_name, bytes));
                }
                _ => continue,
            }
        }
    }

    let content = content.ok_or_else(|| ApiError::BadRequest("Missing content".to_string()))?;
    if content.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing content".to_string()));
    }

    let attachment_path = match &attachment {
        Some((file_name, bytes)) => Some(
            state
                .files
                .save("audit_comments", file_name, bytes)
                .await
                .context("error saving attachment")?,
        ),
        None => None,
    };

    let id = create_id();

    state
        .data
        .audit_comments
        .insert(
            &id,
            &transaction.id,
            &user.id,
            content.trim(),
            attachment_path.as_deref(),
        )
        .await
        .context("error inserting comment")?;

    let comment = state
        .data
        .audit_comments
        .get_one(&id)
        .await
        .context("error reading back comment")?
        .ok_or_else(|| ApiError::UnexpectedError(anyhow!("inserted comment missing")))?;

    return Ok((StatusCode::CREATED, Json(comment)));
}

/// Author-only edit. `remove_attachment=true` drops the current file; a new
/// `attachment` field replaces it.
pub async fn update_comment(
    State(state): State<AppState>,
    user: User,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let comment = state
        .data
        .audit_comments
        .get_one(&id)
        .await
        .context("error getting comment")?
        .ok_or(ApiError::NotFound("comment not found".to_owned()))?;

    if comment.user_id != user.id {
        return Err(ApiError::NoAccess("not your comment".to_owned()));
    }

    let mut content = None;
    let mut attachment = None;
    let mut remove_attachment = false;

    while let Ok(Some(field)) = multipart.next_field().await {
        if let Some(name) = field.name() {
            match name {
                "content" => content = Some(field.text().await.context("error reading content")?),
                "remove_attachment" => {
                    let value = field.text().await.context("error reading flag")?;
                    remove_attachment = value == "true";
                }
                "attachment" => {
                    let file_name = field.file_name().unwrap_or("attachment").to_owned();
                    let bytes = field.bytes().await.context("error reading attachment")?;
                    attachment = Some((file_name, bytes));
                }
                _ => continue,
            }
        }
    }

    let content = match content {
        Some(content) if !content.trim().is_empty() => content.trim().to_owned(),
        _ => comment.content.clone(),
    };

    let mut attachment_path = comment.attachment_path.clone();
    let mut stale_path = None;

    if remove_attachment {
        stale_path = attachment_path.take();
    }

    if let Some((file_name, bytes)) = &attachment {
        let saved = state
            .files
            .save("audit_comments", file_name, bytes)
            .await
            .context("error saving attachment")?;

        stale_path = stale_path.or(attachment_path.take());
        attachment_path = Some(saved);
    }

    state
        .data
        .audit_comments
        .update(&comment.id, &content, attachment_path.as_deref())
        .await
        .context("error updating comment")?;

    if let Some(path) = &stale_path {
        state.files.remove(path).await;
    }

    let updated = state
        .data
        .audit_comments
        .get_one(&comment.id)
        .await
        .context("error reading back comment")?
        .ok_or_else(|| ApiError::UnexpectedError(anyhow!("updated comment missing")))?;

    return Ok(Json(updated));
}

pub async fn delete_comment(
    State(state): State<AppState>,
    user: User,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = state
        .data
        .audit_comments
        .get_one(&id)
        .await
        .context("error getting comment")?
        .ok_or(ApiError::NotFound("comment not found".to_owned()))?;

    if comment.user_id != user.id {
        return Err(ApiError::NoAccess("not your comment".to_owned()));
    }

    state
        .data
        .audit_comments
        .delete(&comment.id)
        .await
        .context("error deleting comment")?;

    if let Some(path) = &comment.attachment_path {
        state.files.remove(path).await;
    }

    return Ok(StatusCode::NO_CONTENT);
}

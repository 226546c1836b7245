use anyhow::Context;
use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;
use serde_json::json;

use crate::{auth_middleware::User, error::ApiError, state::AppState};

/// Whether anything was posted since the caller last opened the board.
/// A user who never marked the board seen always has news.
pub async fn check_new(
    State(state): State<AppState>,
    user: User,
) -> Result<impl IntoResponse, ApiError> {
    let row = state
        .data
        .users
        .get_one(&user.id)
        .await
        .context("error getting user")?
        .ok_or(ApiError::NoAuth("no user".to_owned()))?;

    let has_new = match row.last_seen_notice {
        Some(last_seen) => state
            .data
            .notices
            .exists_created_after(last_seen)
            .await
            .context("error checking notices")?,
        None => true,
    };

    return Ok(Json(json!({ "has_new": has_new })));
}

pub async fn mark_seen(
    State(state): State<AppState>,
    user: User,
) -> Result<impl IntoResponse, ApiError> {
    state
        .data
        .users
        .set_last_seen_notice(&user.id, Utc::now())
        .await
        .context("error updating last seen notice")?;

    return Ok(Json(json!({ "status": "ok" })));
}

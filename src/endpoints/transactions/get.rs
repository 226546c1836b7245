use anyhow::Context;
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{auth_middleware::User, error::ApiError, state::AppState};

/// Owners read their own transactions; auditors may read any.
pub async fn get_one(
    State(state): State<AppState>,
    user: User,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = state
        .data
        .transactions
        .get_one(&id)
        .await
        .context("error getting transaction")?
        .ok_or(ApiError::NotFound("transaction not found".to_owned()))?;

    if transaction.user_id != user.id && !user.is_auditor {
        return Err(ApiError::NoAccess("not your transaction".to_owned()));
    }

    return Ok(Json(transaction));
}

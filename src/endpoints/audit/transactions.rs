use anyhow::Context;
use axum::{Json, extract::State, response::IntoResponse};

use crate::{auth_middleware::User, error::ApiError, state::AppState};

pub async fn all_transactions(
    State(state): State<AppState>,
    user: User,
) -> Result<impl IntoResponse, ApiError> {
    if !user.is_auditor {
        return Err(ApiError::NoAccess("auditor only".to_owned()));
    }

    let transactions = state
        .data
        .transactions
        .all_with_club()
        .await
        .context("error querying transactions")?;

    Ok(Json(transactions))
}

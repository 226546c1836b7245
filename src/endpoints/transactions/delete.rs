use anyhow::Context;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use http::StatusCode;

use crate::{auth_middleware::User, error::ApiError, state::AppState};

/// Deleting a transaction cascades to its receipts and evidence rows; the
/// files they pointed at are removed afterwards, best effort.
pub async fn delete(
    State(state): State<AppState>,
    user: User,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .data
        .transactions
        .get_one_owned(&user.id, &id)
        .await
        .context("error getting transaction")?
        .ok_or(ApiError::NotFound("transaction not found".to_owned()))?;

    let mut paths = state
        .data
        .receipts
        .paths_for_transaction(&id)
        .await
        .context("error collecting receipt paths")?;
    paths.extend(
        state
            .data
            .evidence_files
            .paths_for_transaction(&id)
            .await
            .context("error collecting evidence paths")?,
    );

    state
        .data
        .transactions
        .delete(&user.id, &id)
        .await
        .context("error deleting transaction")?;

    for path in &paths {
        state.files.remove(path).await;
    }

    return Ok(StatusCode::NO_CONTENT);
}

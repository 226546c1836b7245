use anyhow::Context;
use axum::{Json, extract::State, response::IntoResponse};

use crate::{auth_middleware::User, data::Transaction, error::ApiError, state::AppState};

#[utoipa::path(
    get,
    path = "/transactions",
    operation_id = "transactions/query",
    responses(
        (status = 200, body = Vec<Transaction>),
    )
)]
pub async fn query(
    State(state): State<AppState>,
    user: User,
) -> Result<impl IntoResponse, ApiError> {
    let transactions = state
        .data
        .transactions
        .get_owned(&user.id)
        .await
        .context("error querying transactions")?;

    Ok(Json(transactions))
}

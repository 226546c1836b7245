use std::collections::BTreeMap;

use anyhow::Context;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{auth_middleware::User, data::TxKind, error::ApiError, state::AppState};

#[derive(Serialize, ToSchema)]
pub struct CalendarEntry {
    pub kind: TxKind,
    pub title: String,
    pub amount: i64,
}

/// The caller's transactions keyed by `YYYY-MM-DD`, for the calendar view.
pub async fn calendar(
    State(state): State<AppState>,
    user: User,
) -> Result<impl IntoResponse, ApiError> {
    let transactions = state
        .data
        .transactions
        .get_owned(&user.id)
        .await
        .context("error querying transactions")?;

    let mut by_date: BTreeMap<String, Vec<CalendarEntry>> = BTreeMap::new();

    for tx in transactions {
        by_date
            .entry(tx.date.format("%Y-%m-%d").to_string())
            .or_default()
            .push(CalendarEntry {
                kind: tx.kind,
                title: tx.title,
                amount: tx.amount,
            });
    }

    return Ok(Json(by_date));
}

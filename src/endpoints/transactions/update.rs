use std::collections::HashMap;

use anyhow::Context;
use axum::{
    Json,
    extract::{self, Path, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    auth_middleware::User,
    data::UpdateTransaction,
    error::{ApiError, ErrorDetails},
    state::AppState,
};

use super::create::validate_title;

#[derive(Deserialize, ToSchema)]
pub struct UpdateTransactionInput {
    pub title: Option<String>,
    pub amount: Option<i64>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
    pub description: Option<String>,
}

/// Owner-only partial update; absent fields keep their stored value. The
/// review status has its own auditor endpoint and is untouched here.
pub async fn update(
    State(state): State<AppState>,
    user: User,
    Path(id): Path<String>,
    extract::Json(payload): extract::Json<UpdateTransactionInput>,
) -> Result<impl IntoResponse, ApiError> {
    let existing = state
        .data
        .transactions
        .get_one_owned(&user.id, &id)
        .await
        .context("error getting transaction")?
        .ok_or(ApiError::NotFound("transaction not found".to_owned()))?;

    let title = match payload.title {
        Some(title) => title.trim().to_owned(),
        None => existing.title,
    };
    let amount = payload.amount.unwrap_or(existing.amount);
    let date = payload.date.unwrap_or(existing.date);
    let note = payload.note.or(existing.note);
    let description = payload.description.unwrap_or(existing.description);

    let mut errors: HashMap<String, String> = HashMap::new();
    validate_title(&mut errors, &title);
    if amount < 0 {
        errors.insert("amount".to_owned(), "must not be negative".to_owned());
    }
    if !errors.is_empty() {
        return Err(ApiError::BadRequestDetails(
            "invalid request".to_owned(),
            ErrorDetails(errors),
        ));
    }

    state
        .data
        .transactions
        .update_details(
            &user.id,
            &id,
            &UpdateTransaction {
                title: &title,
                amount,
                date,
                note: note.as_deref(),
                description: &description,
            },
        )
        .await
        .context("error updating transaction")?;

    let transaction = state
        .data
        .transactions
        .get_one_owned(&user.id, &id)
        .await
        .context("error reading back transaction")?
        .ok_or(ApiError::NotFound("transaction not found".to_owned()))?;

    return Ok(Json(transaction));
}

use anyhow::{Context, anyhow};
use axum::{
    Json,
    extract::{Multipart, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use http::StatusCode;

use crate::{
    auth_middleware::User,
    data::{InsertTransaction, TxKind, create_id},
    error::ApiError,
    state::AppState,
};

/// Multipart expense entry: the transaction fields plus an optional
/// `receipt` image, saved and linked in the same request.
pub async fn create_with_receipt(
    State(state): State<AppState>,
    user: User,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut title = None;
    let mut amount = None;
    let mut note = None;
    let mut date = None;
    let mut image = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if let Some(name) = field.name() {
            match name {
                "title" => title = Some(field.text().await.context("error reading title")?),
                "amount" => amount = Some(field.text().await.context("error reading amount")?),
                "note" => note = Some(field.text().await.context("error reading note")?),
                "date" => date = Some(field.text().await.context("error reading date")?),
                "receipt" => {
                    let file_name = field.file_name().unwrap_or("receipt").to_owned();
                    let bytes = field.bytes().await.context("error reading receipt")?;
                    image = Some((file_name, bytes));
                }
                _ => continue,
            }
        }
    }

    let title = title.ok_or_else(|| ApiError::BadRequest("Missing title".to_string()))?;
    let amount = amount
        .ok_or_else(|| ApiError::BadRequest("Missing amount".to_string()))?
        .parse::<i64>()
        .map_err(|_| ApiError::BadRequest("Invalid amount".to_string()))?;
    let date = date.ok_or_else(|| ApiError::BadRequest("Missing date".to_string()))?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("Invalid date format".to_string()))?;

    if title.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing title".to_string()));
    }
    if amount < 0 {
        return Err(ApiError::BadRequest("Invalid amount".to_string()));
    }

    let id = create_id();

    state
        .data
        .transactions
        .insert(
            &user.id,
            &InsertTransaction {
                id: id.to_owned(),
                kind: TxKind::Expense,
                title: title.trim().to_owned(),
                amount,
                date,
                note,
                description: String::new(),
                has_receipt: image.is_some(),
            },
        )
        .await
        .context("error inserting transaction")?;

    if let Some((file_name, bytes)) = image {
        let path = state
            .files
            .save("receipts", &file_name, &bytes)
            .await
            .context("error saving receipt image")?;

        state
            .data
            .receipts
            .insert(&create_id(), &id, &path)
            .await
            .context("error inserting receipt")?;
    }

    let transaction = state
        .data
        .transactions
        .get_one_owned(&user.id, &id)
        .await
        .context("error reading back transaction")?
        .ok_or_else(|| ApiError::UnexpectedError(anyhow!("inserted transaction missing")))?;

    return Ok((StatusCode::CREATED, Json(transaction)));
}

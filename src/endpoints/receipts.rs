use anyhow::Context;
use axum::{
    Json,
    extract::{Multipart, Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{auth_middleware::User, data::create_id, error::ApiError, state::AppState};

/// Multipart upload of one receipt image for an owned transaction. Keeps
/// the `has_receipt` cache in step with the receipt rows.
pub async fn upload(
    State(state): State<AppState>,
    user: User,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut transaction_id = None;
    let mut image = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if let Some(name) = field.name() {
            match name {
                "transaction" => {
                    transaction_id =
                        Some(field.text().await.context("error reading transaction id")?);
                }
                "image" => {
                    let file_name = field.file_name().unwrap_or("receipt").to_owned();
                    let bytes = field.bytes().await.context("error reading image")?;
                    image = Some((file_name, bytes));
                }
                _ => continue,
            }
        }
    }

    let transaction_id = transaction_id
        .ok_or_else(|| ApiError::BadRequest("Missing transaction id".to_string()))?;
    let (file_name, bytes) =
        image.ok_or_else(|| ApiError::BadRequest("Missing image".to_string()))?;

    let transaction = state
        .data
        .transactions
        .get_one_owned(&user.id, &transaction_id)
        .await
        .context("error getting transaction")?
        .ok_or(ApiError::NotFound("transaction not found".to_owned()))?;

    let path = state
        .files
        .save("receipts", &file_name, &bytes)
        .await
        .context("error saving receipt image")?;

    state
        .data
        .receipts
        .insert(&create_id(), &transaction.id, &path)
        .await
        .context("error inserting receipt")?;

    if !transaction.has_receipt {
        state
            .data
            .transactions
            .set_has_receipt(&transaction.id, true)
            .await
            .context("error updating has_receipt")?;
    }

    return Ok(Json(json!({ "status": "uploaded" })));
}

pub async fn delete_one(
    State(state): State<AppState>,
    user: User,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let receipt = state
        .data
        .receipts
        .get_one_owned(&user.id, &id)
        .await
        .context("error getting receipt")?
        .ok_or(ApiError::NotFound("receipt not found".to_owned()))?;

    state
        .data
        .receipts
        .delete(&receipt.id)
        .await
        .context("error deleting receipt")?;

    state.files.remove(&receipt.image_path).await;

    let remaining = state
        .data
        .receipts
        .exists_for_transaction(&receipt.transaction_id)
        .await
        .context("error checking remaining receipts")?;

    if !remaining {
        state
            .data
            .transactions
            .set_has_receipt(&receipt.transaction_id, false)
            .await
            .context("error updating has_receipt")?;
    }

    return Ok(Json(json!({ "status": "deleted" })));
}

pub async fn delete_for_transaction(
    State(state): State<AppState>,
    user: User,
    Path(transaction_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = state
        .data
        .transactions
        .get_one_owned(&user.id, &transaction_id)
        .await
        .context("error getting transaction")?
        .ok_or(ApiError::NotFound("transaction not found".to_owned()))?;

    let paths = state
        .data
        .receipts
        .delete_for_transaction(&transaction.id)
        .await
        .context("error deleting receipts")?;

    for path in &paths {
        state.files.remove(path).await;
    }

    state
        .data
        .transactions
        .set_has_receipt(&transaction.id, false)
        .await
        .context("error updating has_receipt")?;

    return Ok(Json(json!({ "status": "deleted" })));
}

pub async fn preview(
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

    let receipt = state
        .data
        .receipts
        .latest_for_transaction(&transaction.id)
        .await
        .context("error getting receipt")?
        .ok_or(ApiError::NotFound("no receipt for transaction".to_owned()))?;

    return Ok(Json(json!({ "image_path": receipt.image_path })));
}

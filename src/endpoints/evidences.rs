use anyhow::Context;
use axum::{
    Json,
    extract::{Multipart, Path, State},
    response::IntoResponse,
};
use http::StatusCode;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::{
    auth_middleware::User,
    data::{Transaction, create_id},
    error::ApiError,
    state::AppState,
};

async fn get_readable_transaction(
    state: &AppState,
    user: &User,
    transaction_id: &str,
) -> Result<Transaction, ApiError> {
    let transaction = state
        .data
        .transactions
        .get_one(transaction_id)
        .await
        .context("error getting transaction")?
        .ok_or(ApiError::NotFound("transaction not found".to_owned()))?;

    if transaction.user_id != user.id && !user.is_auditor {
        return Err(ApiError::NoAccess("not your transaction".to_owned()));
    }

    return Ok(transaction);
}

pub async fn query(
    State(state): State<AppState>,
    user: User,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = get_readable_transaction(&state, &user, &id).await?;

    let evidences = state
        .data
        .evidence_files
        .get_for_transaction(&transaction.id)
        .await
        .context("error querying evidence files")?;

    return Ok(Json(evidences));
}

/// Multipart upload of one or more `file` fields onto an owned transaction.
pub async fn upload(
    State(state): State<AppState>,
    user: User,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = state
        .data
        .transactions
        .get_one_owned(&user.id, &id)
        .await
        .context("error getting transaction")?
        .ok_or(ApiError::NotFound("transaction not found".to_owned()))?;

    let mut uploaded = 0;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("evidence").to_owned();
        let bytes = field.bytes().await.context("error reading file")?;

        let path = state
            .files
            .save("evidences", &file_name, &bytes)
            .await
            .context("error saving evidence file")?;

        state
            .data
            .evidence_files
            .insert(&create_id(), &transaction.id, &path)
            .await
            .context("error inserting evidence file")?;

        uploaded += 1;
    }

    if uploaded == 0 {
        return Err(ApiError::BadRequest("Missing file".to_string()));
    }

    return Ok((StatusCode::CREATED, Json(json!({ "uploaded": uploaded }))));
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateEvidenceInput {
    pub description: String,
}

pub async fn update(
    State(state): State<AppState>,
    user: User,
    Path((id, evidence_id)): Path<(String, String)>,
    Json(payload): Json<UpdateEvidenceInput>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .data
        .transactions
        .get_one_owned(&user.id, &id)
        .await
        .context("error getting transaction")?
        .ok_or(ApiError::NotFound("transaction not found".to_owned()))?;

    let evidence = state
        .data
        .evidence_files
        .get_one(&id, &evidence_id)
        .await
        .context("error getting evidence file")?
        .ok_or(ApiError::NotFound("evidence not found".to_owned()))?;

    let description = payload.description.trim();
    if description.is_empty() {
        return Err(ApiError::BadRequest("Missing description".to_string()));
    }

    state
        .data
        .evidence_files
        .set_description(&evidence.id, description)
        .await
        .context("error updating evidence description")?;

    return Ok(Json(json!({ "description": description })));
}

pub async fn delete(
    State(state): State<AppState>,
    user: User,
    Path((id, evidence_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .data
        .transactions
        .get_one_owned(&user.id, &id)
        .await
        .context("error getting transaction")?
        .ok_or(ApiError::NotFound("transaction not found".to_owned()))?;

    let evidence = state
        .data
        .evidence_files
        .get_one(&id, &evidence_id)
        .await
        .context("error getting evidence file")?
        .ok_or(ApiError::NotFound("evidence not found".to_owned()))?;

    state
        .data
        .evidence_files
        .delete(&evidence.id)
        .await
        .context("error deleting evidence file")?;

    state.files.remove(&evidence.file_path).await;

    return Ok(StatusCode::NO_CONTENT);
}

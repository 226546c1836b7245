use anyhow::Context;
use axum::{
    Json,
    extract::{Multipart, State},
    response::IntoResponse,
};

use crate::{
    auth_middleware::User, error::ApiError, services::ingest::IngestOutput, services, state::AppState,
};

#[utoipa::path(
    post,
    path = "/transactions/import",
    operation_id = "transactions/import",
    responses(
        (status = 200, body = IngestOutput)
    )
)]
pub async fn import(
    State(state): State<AppState>,
    user: User,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut bank = None;
    let mut file = None;

    // collect all fields first before processing
    while let Ok(Some(field)) = multipart.next_field().await {
        if let Some(name) = field.name() {
            match name {
                "bank" => {
                    bank = Some(field.text().await.context("error reading bank id")?);
                }
                "file" => {
                    let file_name = field.file_name().unwrap_or("statement").to_owned();
                    let bytes = field.bytes().await.context("error reading file")?;
                    file = Some((file_name, bytes));
                }
                _ => continue,
            }
        }
    }

    let bank = bank.ok_or_else(|| ApiError::BadRequest("Missing bank".to_string()))?;
    let (file_name, bytes) =
        file.ok_or_else(|| ApiError::BadRequest("Missing file".to_string()))?;

    let output = services::ingest::ingest(&state.data, &user.id, &bank, &file_name, &bytes).await?;

    return Ok(Json(output));
}

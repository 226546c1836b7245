use anyhow::Context;
use axum::{
    Json,
    extract::{self, Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::{auth_middleware::User, data::ReviewStatus, error::ApiError, state::AppState};

#[derive(Deserialize, ToSchema)]
pub struct UpdateReviewStatusInput {
    pub review_status: String,
}

/// The one transaction field auditors may write.
pub async fn update_review_status(
    State(state): State<AppState>,
    user: User,
    Path(id): Path<String>,
    extract::Json(payload): extract::Json<UpdateReviewStatusInput>,
) -> Result<impl IntoResponse, ApiError> {
    if !user.is_auditor {
        return Err(ApiError::NoAccess("auditor only".to_owned()));
    }

    let status = ReviewStatus::parse(&payload.review_status)
        .ok_or_else(|| ApiError::BadRequest("invalid review status".to_owned()))?;

    let updated = state
        .data
        .transactions
        .set_review_status(&id, status)
        .await
        .context("error updating review status")?;

    if updated == 0 {
        return Err(ApiError::NotFound("transaction not found".to_owned()));
    }

    return Ok(Json(json!({ "id": id, "review_status": status })));
}

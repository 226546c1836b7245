use axum::{
    Json,
    extract::{self, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    auth_middleware::User, error::ApiError, services, services::fee_match::FeeMatchOutput,
    state::AppState,
};

#[derive(Deserialize, ToSchema)]
pub struct CheckPaymentInput {
    pub start_date: String,
    pub end_date: String,
    pub amount: i64,
}

#[utoipa::path(
    post,
    path = "/members/check-payment",
    operation_id = "members/check-payment",
    request_body(
        content = CheckPaymentInput,
        content_type = "application/json",
    ),
    responses(
        (status = 200, body = FeeMatchOutput)
    )
)]
pub async fn check_payment(
    State(state): State<AppState>,
    user: User,
    extract::Json(payload): extract::Json<CheckPaymentInput>,
) -> Result<impl IntoResponse, ApiError> {
    let start_date = NaiveDate::parse_from_str(&payload.start_date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("invalid start_date".to_owned()))?;
    let end_date = NaiveDate::parse_from_str(&payload.end_date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("invalid end_date".to_owned()))?;

    let output = services::fee_match::match_payments(
        &state.data,
        &user.id,
        start_date,
        end_date,
        payload.amount,
    )
    .await?;

    return Ok(Json(output));
}

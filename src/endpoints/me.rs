use axum::{Json, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{auth_middleware::User, error::ApiError};

#[derive(Serialize, ToSchema)]
pub struct Me {
    pub id: String,
    pub username: String,
    pub club_name: Option<String>,
    pub is_auditor: bool,
}

#[utoipa::path(
    get,
    path = "/@me",
    responses(
        (status = 200, body = Me)
    )
)]
pub async fn get_me(user: User) -> Result<impl IntoResponse, ApiError> {
    return Ok(Json(Me {
        id: user.id,
        username: user.username,
        club_name: user.club_name,
        is_auditor: user.is_auditor,
    }));
}

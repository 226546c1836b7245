use anyhow::Context;
use axum::{Json, extract::State, response::IntoResponse};
use cookie::{
    CookieBuilder,
    time::{Duration, OffsetDateTime},
};
use hyper::{HeaderMap, header};
use serde::Deserialize;
use serde_json::json;

use crate::{error::ApiError, services, state::AppState};

#[derive(Deserialize)]
pub struct DevLoginInput {
    pub username: String,
    pub club_name: Option<String>,
    #[serde(default)]
    pub is_auditor: bool,
}

pub async fn ___dev_login___(
    State(state): State<AppState>,
    Json(payload): Json<DevLoginInput>,
) -> Result<impl IntoResponse, ApiError> {
    let auth_token = services::auth::dev_login(
        &state.data,
        &state.config.secret,
        &payload.username,
        payload.club_name,
        payload.is_auditor,
    )
    .await?;

    let auth_cookie = create_auth_cookie(state.config.use_secure_cookies, &auth_token);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        auth_cookie.parse().context("error parsing auth cookie")?,
    );

    return Ok((headers, Json(json!({ "token": auth_token }))));
}

fn create_auth_cookie(is_secure: bool, auth_token: &str) -> String {
    CookieBuilder::new("auth", auth_token)
        .secure(is_secure)
        .same_site(cookie::SameSite::Lax)
        .http_only(true)
        .path("/")
        .expires(cookie::Expiration::from(
            OffsetDateTime::now_utc().saturating_add(Duration::days(7)),
        ))
        .build()
        .to_string()
}

use anyhow::{Context, anyhow};
use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts},
};
use axum_extra::{TypedHeader, headers, typed_header::TypedHeaderRejectionReason};
use http::request::Parts;
use hyper::header;

use crate::{error::ApiError, services::auth::verify_token, state::AppState};

#[derive(Debug)]
pub struct User {
    pub id: String,
    pub username: String,
    pub club_name: Option<String>,
    pub is_auditor: bool,
}

impl<S> FromRequestParts<S> for User
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let cookies = parts
            .extract::<TypedHeader<headers::Cookie>>()
            .await
            .map_err(|e| {
                if *e.name() == header::COOKIE
                    && matches!(e.reason(), TypedHeaderRejectionReason::Missing)
                {
                    ApiError::NoAuth("no cookies".to_owned())
                } else {
                    ApiError::UnexpectedError(anyhow!("error getting cookies"))
                }
            })?;

        let auth_cookie = cookies
            .get("auth")
            .ok_or(ApiError::NoAuth("no cookie".to_owned()))?;

        let auth_token = verify_token(&state.config.secret, auth_cookie)
            .map_err(|_| ApiError::NoAuth("invalid token".to_owned()))?;

        let session = state
            .data
            .sessions
            .get_one(&auth_token.user_id, &auth_token.session_id)
            .await
            .context("error getting session")?
            .ok_or(ApiError::NoAuth("no session".to_string()))?;

        let user = state
            .data
            .users
            .get_one(&session.user_id)
            .await
            .context("error getting user")?
            .ok_or(ApiError::NoAuth("no user".to_string()))?;

        return Ok(User {
            id: user.id,
            username: user.username,
            club_name: user.club_name,
            is_auditor: user.is_auditor,
        });
    }
}

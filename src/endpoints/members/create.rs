use std::collections::HashMap;

use anyhow::{Context, anyhow};
use axum::{
    Json,
    extract::{self, State},
    response::IntoResponse,
};
use http::StatusCode;
use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};
use utoipa::ToSchema;

use crate::{
    auth_middleware::User,
    data::{InsertMember, Member, MemberType, create_id},
    error::{ApiError, ErrorDetails},
    state::AppState,
};

#[serde_as]
#[derive(Deserialize, ToSchema)]
pub struct CreateMemberInput {
    pub name: String,
    pub student_id: String,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub college: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub department: Option<String>,
    pub grade: Option<i16>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub phone_number: Option<String>,
    pub member_type: Option<MemberType>,
}

pub fn is_valid_phone_number(value: &str) -> bool {
    return value.len() == 11 && value.chars().all(|c| c.is_ascii_digit());
}

pub async fn create(
    State(state): State<AppState>,
    user: User,
    extract::Json(payload): extract::Json<CreateMemberInput>,
) -> Result<impl IntoResponse, ApiError> {
    let mut errors: HashMap<String, String> = HashMap::new();

    let name = payload.name.trim();
    if name.is_empty() {
        errors.insert("name".to_owned(), "required".to_owned());
    }

    let student_id = payload.student_id.trim();
    if student_id.is_empty() {
        errors.insert("student_id".to_owned(), "required".to_owned());
    }

    if let Some(phone_number) = &payload.phone_number {
        if !is_valid_phone_number(phone_number) {
            errors.insert(
                "phone_number".to_owned(),
                "must be 11 digits without hyphens".to_owned(),
            );
        }
    }

    if !errors.is_empty() {
        return Err(ApiError::BadRequestDetails(
            "invalid request".to_owned(),
            ErrorDetails(errors),
        ));
    }

    let existing = state
        .data
        .members
        .get_by_student_id(&user.id, student_id)
        .await
        .context("error checking student id")?;

    if existing.is_some() {
        let mut errors = HashMap::new();
        errors.insert("student_id".to_owned(), "already registered".to_owned());
        return Err(ApiError::BadRequestDetails(
            "invalid request".to_owned(),
            ErrorDetails(errors),
        ));
    }

    let id = create_id();

    state
        .data
        .members
        .insert(
            &user.id,
            &InsertMember {
                id: id.to_owned(),
                name: name.to_owned(),
                student_id: student_id.to_owned(),
                college: payload.college,
                department: payload.department,
                grade: payload.grade,
                phone_number: payload.phone_number,
                member_type: payload.member_type,
                has_paid: false,
                joined_at: chrono::Utc::now().date_naive(),
            },
        )
        .await
        .context("error inserting member")?;

    let member: Member = state
        .data
        .members
        .get_one_owned(&user.id, &id)
        .await
        .context("error reading back member")?
        .ok_or_else(|| ApiError::UnexpectedError(anyhow!("inserted member missing")))?;

    return Ok((StatusCode::CREATED, Json(member)));
}

use std::collections::HashMap;

use anyhow::Context;
use axum::{
    Json,
    extract::{self, Path, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    auth_middleware::User,
    data::MemberType,
    error::{ApiError, ErrorDetails},
    state::AppState,
};

use super::create::is_valid_phone_number;

#[derive(Deserialize, ToSchema)]
pub struct UpdateMemberInput {
    pub name: Option<String>,
    pub college: Option<String>,
    pub department: Option<String>,
    pub grade: Option<i16>,
    pub phone_number: Option<String>,
    pub member_type: Option<MemberType>,
    pub has_paid: Option<bool>,
    pub joined_at: Option<NaiveDate>,
}

pub async fn update(
    State(state): State<AppState>,
    user: User,
    Path(id): Path<String>,
    extract::Json(payload): extract::Json<UpdateMemberInput>,
) -> Result<impl IntoResponse, ApiError> {
    let mut member = state
        .data
        .members
        .get_one_owned(&user.id, &id)
        .await
        .context("error getting member")?
        .ok_or(ApiError::NotFound("member not found".to_owned()))?;

    if let Some(phone_number) = &payload.phone_number {
        if !is_valid_phone_number(phone_number) {
            let mut errors = HashMap::new();
            errors.insert(
                "phone_number".to_owned(),
                "must be 11 digits without hyphens".to_owned(),
            );
            return Err(ApiError::BadRequestDetails(
                "invalid request".to_owned(),
                ErrorDetails(errors),
            ));
        }
    }

    if let Some(name) = payload.name {
        member.name = name;
    }
    if let Some(college) = payload.college {
        member.college = Some(college);
    }
    if let Some(department) = payload.department {
        member.department = Some(department);
    }
    if let Some(grade) = payload.grade {
        member.grade = Some(grade);
    }
    if let Some(phone_number) = payload.phone_number {
        member.phone_number = Some(phone_number);
    }
    if let Some(member_type) = payload.member_type {
        member.member_type = Some(member_type);
    }
    if let Some(has_paid) = payload.has_paid {
        member.has_paid = has_paid;
    }
    if let Some(joined_at) = payload.joined_at {
        member.joined_at = joined_at;
    }

    state
        .data
        .members
        .update(&member)
        .await
        .context("error updating member")?;

    return Ok(Json(member));
}

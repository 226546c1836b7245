use anyhow::Context;
use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{auth_middleware::User, data::CommentFilter, error::ApiError, state::AppState};

#[derive(Deserialize, IntoParams)]
pub struct SummaryQuery {
    pub club: Option<String>,
    pub keyword: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub only_mine: bool,
}

fn parse_date(value: &Option<String>, field: &str) -> Result<Option<NaiveDate>, ApiError> {
    match value {
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("invalid {field}"))),
        None => Ok(None),
    }
}

/// Cross-club comment feed. Non-auditors only ever see comments on their
/// own transactions; auditors see everything unless they ask for
/// `only_mine`.
pub async fn comments_summary(
    State(state): State<AppState>,
    user: User,
    Query(query): Query<SummaryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let start_date = parse_date(&query.start_date, "start_date")?;
    let end_date = parse_date(&query.end_date, "end_date")?;

    let restrict = !user.is_auditor || query.only_mine;

    let filter = CommentFilter {
        transactions_of: restrict.then_some(user.id.as_str()),
        club: query.club.as_deref(),
        keyword: query.keyword.as_deref(),
        start_date,
        end_date,
    };

    let comments = state
        .data
        .audit_comments
        .summary(&filter)
        .await
        .context("error querying comment summary")?;

    return Ok(Json(comments));
}

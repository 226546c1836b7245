use std::collections::HashMap;

use anyhow::{Context, anyhow};
use axum::{
    Json,
    extract::{self, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use http::StatusCode;
use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};
use utoipa::ToSchema;

use crate::{
    auth_middleware::User,
    data::{InsertTransaction, Transaction, TxKind, create_id},
    error::{ApiError, ErrorDetails},
    state::AppState,
};

#[serde_as]
#[derive(Deserialize, ToSchema)]
pub struct CreateTransactionInput {
    pub kind: TxKind,
    pub title: String,
    pub amount: i64,
    pub date: NaiveDate,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub note: Option<String>,
}

pub fn validate_title(errors: &mut HashMap<String, String>, title: &str) {
    if title.is_empty() {
        errors.insert("title".to_owned(), "required".to_owned());
    } else if title.chars().count() > 100 {
        errors.insert("title".to_owned(), "must be shorter than 100".to_owned());
    }
}

#[utoipa::path(
    post,
    path = "/transactions",
    operation_id = "transactions/create",
    request_body(
        content = CreateTransactionInput,
        content_type = "application/json",
    ),
    responses(
        (status = 201, body = Transaction)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    user: User,
    extract::Json(payload): extract::Json<CreateTransactionInput>,
) -> Result<impl IntoResponse, ApiError> {
    let mut errors: HashMap<String, String> = HashMap::new();

    let title = payload.title.trim();
    validate_title(&mut errors, title);

    if payload.amount < 0 {
        errors.insert("amount".to_owned(), "must not be negative".to_owned());
    }

    if !errors.is_empty() {
        return Err(ApiError::BadRequestDetails(
            "invalid request".to_owned(),
            ErrorDetails(errors),
        ));
    }

    let id = create_id();

    state
        .data
        .transactions
        .insert(
            &user.id,
            &InsertTransaction {
                id: id.to_owned(),
                kind: payload.kind,
                title: title.to_owned(),
                amount: payload.amount,
                date: payload.date,
                note: payload.note,
                description: String::new(),
                has_receipt: false,
            },
        )
        .await
        .context("error inserting transaction")?;

    let transaction = state
        .data
        .transactions
        .get_one_owned(&user.id, &id)
        .await
        .context("error reading back transaction")?
        .ok_or_else(|| ApiError::UnexpectedError(anyhow!("inserted transaction missing")))?;

    return Ok((StatusCode::CREATED, Json(transaction)));
}

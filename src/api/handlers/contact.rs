/*
 * Responsibility
 * - POST /contact
 * - ValidJson で検証済みの ContactSubmission を受け、repo に insert を依頼する
 * - 失敗は AppError (500 + error code) で返す。retry はしない
 */
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::contact::{ContactCreatedResponse, ContactSubmission},
        extractors::ValidJson,
    },
    error::AppError,
    repos::contact_repo,
    state::AppState,
};

pub async fn submit_contact(
    State(state): State<AppState>,
    ValidJson(submission): ValidJson<ContactSubmission>,
) -> Result<Json<ContactCreatedResponse>, AppError> {
    let id = contact_repo::create(
        &state.db,
        submission.name(),
        submission.email(),
        submission.phone(),
        submission.message(),
    )
    .await?;

    Ok(Json(ContactCreatedResponse { success: true, id }))
}

/*
 * Responsibility
 * - GET / (起動確認用の固定メッセージ)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"message": "Comphilfe API is running"})),
    )
}

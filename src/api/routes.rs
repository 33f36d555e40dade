/*
 * Responsibility
 * - URL 構造を定義
 * - /, /health, /test, /contact (すべて認証なし)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::handlers::{
    contact::submit_contact, diagnostics::diagnostics, health::health, root::root,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/test", get(diagnostics))
        .route("/contact", post(submit_contact))
}

/*
 * Responsibility
 * - GET /test (DB 接続状況の診断)
 * - 失敗はすべてレスポンス body に載せる (エラーにはしない)
 * - 設定はあるが client を作れなかった場合は "missing" ではなく error として返す
 */
use axum::{Json, extract::State};
use tracing::warn;

use crate::{
    api::dto::diagnostics::{DiagnosticsResponse, redact_url},
    services::database::{Database, DbError},
    state::AppState,
};

pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let mut report = DiagnosticsResponse {
        backend: "ok",
        database: "not available",
        database_url: state
            .database
            .url
            .as_deref()
            .map(redact_url)
            .unwrap_or_default(),
        database_name: state.database.name.clone().unwrap_or_default(),
        connection_status: "missing DATABASE_URL/NAME".to_string(),
        collections: Vec::new(),
    };

    match &state.db {
        Database::Unconfigured => {}
        Database::Unusable { reason } => {
            report.database = "error";
            report.connection_status = DbError::ClientInit(reason.clone()).to_string();
        }
        Database::Configured(gateway) => match gateway.list_collection_names().await {
            Ok(mut names) => {
                names.sort();
                report.database = "ok";
                report.connection_status = "connected".to_string();
                report.collections = names;
            }
            Err(e) => {
                warn!(error = %e, backend = gateway.backend_name(), "collection lookup failed");
                report.database = "error";
                report.connection_status = e.to_string();
            }
        },
    }

    Json(report)
}

/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: Database (Unconfigured / Unusable / Configured), database: 起動時の接続設定
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use crate::config::DatabaseSettings;
use crate::services::database::Database;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Database,
    pub database: DatabaseSettings,
}

impl AppState {
    pub fn new(db: Database, database: DatabaseSettings) -> Self {
        Self { db, database }
    }
}

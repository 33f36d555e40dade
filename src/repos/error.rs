/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 */
use thiserror::Error;

use crate::services::database::DbError;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
}

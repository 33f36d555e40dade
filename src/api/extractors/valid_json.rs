/*
 * Responsibility
 * - JSON body を受けて T に deserialize する (T 側の try_from で validate 済み)
 * - 失敗時は axum の plain-text rejection ではなく AppError (JSON body) を返す
 * - handler に届くのは検証を通った値だけ
 */
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::AppError;

/// AppJson
///
/// `Json` with its rejection mapped into [`AppError`], so a malformed body
/// gets the same `{error, message}` response as every other failure.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

/// OrderId
///
/// The `{id}` path segment of the order routes. Orders are only ever
/// addressed by UUID, so a segment that does not parse names no order and is
/// reported as `NotFound`.
pub struct OrderId(pub Uuid);

impl<S> FromRequestParts<S> for OrderId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        Uuid::parse_str(&raw)
            .map(OrderId)
            .map_err(|_| AppError::NotFound(format!("order {}", raw)))
    }
}

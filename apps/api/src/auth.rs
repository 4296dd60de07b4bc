//! Caller identity. Authentication itself happens upstream; the gateway forwards
//! the verified user id in `x-user-id`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}

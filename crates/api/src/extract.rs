use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;

const USER_HEADER: &str = "x-user-id";

/// Acting user for admin mutations, taken from the `x-user-id` header.
/// The header only identifies the caller; the core services verify the
/// user exists and is active before any mutation runs.
pub struct ActingUser(pub i64);

impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized(format!("{USER_HEADER} header is required")))?;
        let id = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::Unauthorized(format!("{USER_HEADER} must be a numeric user id")))?;
        Ok(ActingUser(id))
    }
}

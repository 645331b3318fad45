use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;

use super::services::AuthService;
use crate::error::AppError;

/// Authenticated caller. Extracting it validates the bearer token; handlers
/// trust the contained user ID without re-checking.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

/// Reads `Authorization: Bearer <token>`. Anything else counts as no token.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::MissingToken)?;

    let token = auth
        .strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .map(str::trim)
        .ok_or(AppError::MissingToken)?;

    if token.is_empty() {
        return Err(AppError::MissingToken);
    }
    Ok(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthService: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .inspect_err(|_| warn!(uri = %parts.uri, "request without bearer token"))?;
        let claims = AuthService::from_ref(state).verify_token(token)?;
        Ok(AuthUser(claims.sub))
    }
}

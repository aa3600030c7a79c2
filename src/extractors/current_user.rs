//! Resolve the caller from the `Authorization: Bearer` header.

use crate::auth::{bearer_token, CurrentUser};
use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".into()))?;
        let token = bearer_token(header)
            .ok_or_else(|| AppError::Unauthorized("malformed authorization header".into()))?;
        let claims = state.tokens.verify(token).map_err(|e| {
            tracing::warn!(error = %e, "rejected bearer token");
            e
        })?;
        let user = CurrentUser::try_from(claims)?;
        if !user.is_active {
            return Err(AppError::Unauthorized("inactive user".into()));
        }
        Ok(user)
    }
}

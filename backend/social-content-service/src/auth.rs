/// Access gate: bearer-token authentication for protected routes
///
/// `AuthenticatedUser` is an extractor, so the check runs before the handler
/// body and a rejected request never reaches the interaction engine. Missing,
/// invalid, and expired tokens are told apart in the logs but every one of
/// them produces the same 401 `{"msg": "Authorization denied"}` response.
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;
use crate::security::TokenError;
use crate::AppState;

/// The acting identity attached to an authenticated request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
}

fn bearer_token(req: &HttpRequest) -> Result<&str, TokenError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .ok_or(TokenError::Missing)?;

    header.strip_prefix("Bearer ").ok_or(TokenError::Invalid)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("application state not configured".to_string()))?;

    let user_id = bearer_token(req)
        .and_then(|token| state.keys.verify(token))
        .and_then(|claims| claims.user_id())
        .map_err(|err| {
            tracing::debug!(path = %req.path(), reason = %err, "request rejected at access gate");
            AppError::Unauthorized
        })?;

    Ok(AuthenticatedUser { id: user_id })
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

/// User handlers - registration, login, profile lookups
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::{AppError, Result};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Session token response for register and login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct UsersBatchRequest {
    #[serde(rename = "userIds")]
    pub user_ids: Vec<Uuid>,
}

/// Register a new user and hand back a session token
/// POST /api/users/register
pub async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let user = state
        .users()
        .register(&req.name, &req.email, &req.password)
        .await?;

    let token = state
        .keys
        .issue(user.id)
        .map_err(|err| AppError::Internal(err.to_string()))?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Log in an already registered user
/// POST /api/users/login
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let user = state.users().authenticate(&req.email, &req.password).await?;

    let token = state
        .keys
        .issue(user.id)
        .map_err(|err| AppError::Internal(err.to_string()))?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Profile of the calling user, credential hash excluded
/// GET /api/users/current
pub async fn current_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let profile = state.users().profile(user.id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Bulk profile fetch, keyed by user id
/// POST /api/users
pub async fn get_users_batch(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    req: web::Json<UsersBatchRequest>,
) -> Result<HttpResponse> {
    let profiles = state.users().profiles_by_ids(&req.user_ids).await?;
    Ok(HttpResponse::Ok().json(profiles))
}
